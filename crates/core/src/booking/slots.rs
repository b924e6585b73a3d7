use crate::constants::{SLOT_END_HOUR, SLOT_INTERVAL_MINUTES, SLOT_START_HOUR};
use crate::{PortalError, PortalResult};
use clinic_types::TimeSlot;

/// The span of a day in which appointments can be booked.
///
/// The window knows nothing about dates, holidays or existing bookings: every day offers the
/// same slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    start_hour: u8,
    end_hour: u8,
    interval_minutes: u8,
}

impl SlotWindow {
    /// `start_hour` is inclusive, `end_hour` exclusive. The interval must divide an hour evenly.
    ///
    /// # Arguments
    /// * `start_hour` - First bookable hour, e.g. `9`
    /// * `end_hour` - Hour at which booking stops, at most `24`
    /// * `interval_minutes` - Spacing between slots, a divisor of 60
    ///
    /// # Errors
    /// Returns [`PortalError::InvalidSlotWindow`] for an empty or inverted window, an end hour past
    /// midnight, or an interval that does not divide an hour.
    pub fn new(start_hour: u8, end_hour: u8, interval_minutes: u8) -> PortalResult<Self> {
        if end_hour > 24 {
            return Err(PortalError::InvalidSlotWindow(format!(
                "end hour {end_hour} is past midnight"
            )));
        }
        if start_hour >= end_hour {
            return Err(PortalError::InvalidSlotWindow(format!(
                "start hour {start_hour} must be before end hour {end_hour}"
            )));
        }
        if interval_minutes == 0 || interval_minutes > 60 || 60 % interval_minutes != 0 {
            return Err(PortalError::InvalidSlotWindow(format!(
                "interval of {interval_minutes} minutes does not divide an hour"
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
            interval_minutes,
        })
    }

    /// First bookable hour (inclusive).
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// Hour at which booking stops (exclusive).
    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    pub fn interval_minutes(&self) -> u8 {
        self.interval_minutes
    }

    /// Slots in chronological order. Lazy; collect it if you need a list.
    pub fn slots(&self) -> impl Iterator<Item = TimeSlot> {
        let start = u32::from(self.start_hour) * 60;
        let end = u32::from(self.end_hour) * 60;
        (start..end)
            .step_by(usize::from(self.interval_minutes))
            .filter_map(|minutes| TimeSlot::from_minutes(minutes).ok())
    }

    /// Number of slots the window generates.
    pub fn len(&self) -> usize {
        usize::from(self.end_hour - self.start_hour) * 60 / usize::from(self.interval_minutes)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `slot` is one of the times this window generates.
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        let minutes = slot.minutes_since_midnight();
        let start = u32::from(self.start_hour) * 60;
        let end = u32::from(self.end_hour) * 60;
        (start..end).contains(&minutes) && (minutes - start) % u32::from(self.interval_minutes) == 0
    }
}

impl Default for SlotWindow {
    fn default() -> Self {
        Self {
            start_hour: SLOT_START_HOUR,
            end_hour: SLOT_END_HOUR,
            interval_minutes: SLOT_INTERVAL_MINUTES,
        }
    }
}

/// Every bookable slot of a standard clinic day: `09:00` to `16:30` in half-hour steps.
pub fn generate_time_slots() -> Vec<TimeSlot> {
    SlotWindow::default().slots().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_day_has_sixteen_half_hour_slots() {
        let slots = generate_time_slots();
        assert_eq!(slots.len(), 16);
        assert_eq!(slots.first().map(ToString::to_string).as_deref(), Some("09:00"));
        assert_eq!(slots.last().map(ToString::to_string).as_deref(), Some("16:30"));
        assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_time_slots(), generate_time_slots());
        let rendered: Vec<String> = generate_time_slots().iter().map(ToString::to_string).collect();
        assert_eq!(&rendered[..3], ["09:00", "09:30", "10:00"]);
    }

    #[test]
    fn len_matches_generated_count() {
        let window = SlotWindow::new(8, 12, 15).unwrap();
        assert_eq!(window.len(), 16);
        assert_eq!(window.slots().count(), window.len());
        assert_eq!(SlotWindow::default().len(), 16);
    }

    #[test]
    fn contains_only_generated_times() {
        let window = SlotWindow::default();
        assert!(window.contains(&TimeSlot::parse("09:00").unwrap()));
        assert!(window.contains(&TimeSlot::parse("16:30").unwrap()));
        assert!(!window.contains(&TimeSlot::parse("17:00").unwrap()));
        assert!(!window.contains(&TimeSlot::parse("08:30").unwrap()));
        assert!(!window.contains(&TimeSlot::parse("10:15").unwrap()));
    }

    #[test]
    fn rejects_unusable_windows() {
        assert!(SlotWindow::new(17, 9, 30).is_err());
        assert!(SlotWindow::new(9, 9, 30).is_err());
        assert!(SlotWindow::new(9, 25, 30).is_err());
        assert!(SlotWindow::new(9, 17, 0).is_err());
        assert!(SlotWindow::new(9, 17, 45).is_err());
        assert!(SlotWindow::new(0, 24, 60).is_ok());
    }
}
