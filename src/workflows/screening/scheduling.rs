//! Interview scheduling collaborator. Absence of availability is not an
//! error; the pipeline logs and moves on.

use std::sync::Mutex;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use super::domain::{Candidate, CandidateId};

/// One bookable interview opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterviewSlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
}

/// Confirmed booking for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewBooking {
    pub candidate_id: CandidateId,
    pub slot: InterviewSlot,
    pub interviewer: String,
    pub location: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("calendar unavailable: {0}")]
    Unavailable(String),
    #[error("slot is no longer available")]
    SlotTaken,
}

/// Calendar seam the orchestrator books interviews through.
pub trait InterviewScheduler: Send + Sync {
    fn available_slots(&self, start: NaiveDate, days_ahead: u32) -> Vec<InterviewSlot>;
    fn book(
        &self,
        candidate: &Candidate,
        slot: &InterviewSlot,
    ) -> Result<InterviewBooking, ScheduleError>;
}

const SLOT_HOURS: [u32; 7] = [9, 10, 11, 14, 15, 16, 17];
const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Calendar generating weekday business-hour slots and tracking bookings in
/// memory. Stands in for an external calendar provider.
#[derive(Debug)]
pub struct BusinessHoursCalendar {
    interviewer: String,
    location: String,
    booked: Mutex<Vec<InterviewBooking>>,
}

impl BusinessHoursCalendar {
    pub fn new(interviewer: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            interviewer: interviewer.into(),
            location: location.into(),
            booked: Mutex::new(Vec::new()),
        }
    }

    pub fn bookings(&self) -> Vec<InterviewBooking> {
        self.booked.lock().expect("booking mutex poisoned").clone()
    }
}

impl Default for BusinessHoursCalendar {
    fn default() -> Self {
        Self::new("HR Team", "Remote")
    }
}

impl InterviewScheduler for BusinessHoursCalendar {
    fn available_slots(&self, start: NaiveDate, days_ahead: u32) -> Vec<InterviewSlot> {
        let booked = self.booked.lock().expect("booking mutex poisoned");
        let mut slots = Vec::new();

        for offset in 0..days_ahead {
            let date = start + Duration::days(i64::from(offset));
            // Monday through Friday only.
            if date.weekday().number_from_monday() > 5 {
                continue;
            }
            for hour in SLOT_HOURS {
                let time = NaiveTime::from_hms_opt(hour, 0, 0).expect("valid slot time");
                let taken = booked
                    .iter()
                    .any(|booking| booking.slot.date == date && booking.slot.time == time);
                if !taken {
                    slots.push(InterviewSlot {
                        date,
                        time,
                        duration_minutes: DEFAULT_DURATION_MINUTES,
                    });
                }
            }
        }

        slots
    }

    fn book(
        &self,
        candidate: &Candidate,
        slot: &InterviewSlot,
    ) -> Result<InterviewBooking, ScheduleError> {
        let mut booked = self.booked.lock().expect("booking mutex poisoned");
        let taken = booked
            .iter()
            .any(|booking| booking.slot.date == slot.date && booking.slot.time == slot.time);
        if taken {
            return Err(ScheduleError::SlotTaken);
        }

        let booking = InterviewBooking {
            candidate_id: candidate.id.clone(),
            slot: *slot,
            interviewer: self.interviewer.clone(),
            location: self.location.clone(),
        };
        booked.push(booking.clone());

        tracing::info!(
            candidate = %candidate.id.0,
            date = %slot.date,
            time = %slot.time.format("%H:%M"),
            "interview booked"
        );

        Ok(booking)
    }
}
