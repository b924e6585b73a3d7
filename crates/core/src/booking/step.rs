use serde::{Deserialize, Serialize};

/// One stage of the booking sequence, in the order the user visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Clinic,
    Specialty,
    Doctor,
    DateTime,
    Review,
}

impl BookingStep {
    pub const ALL: [BookingStep; 5] = [
        BookingStep::Clinic,
        BookingStep::Specialty,
        BookingStep::Doctor,
        BookingStep::DateTime,
        BookingStep::Review,
    ];

    pub const FIRST: BookingStep = BookingStep::Clinic;
    pub const LAST: BookingStep = BookingStep::Review;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Heading shown above the step.
    pub fn title(self) -> &'static str {
        match self {
            BookingStep::Clinic => "Select clinic",
            BookingStep::Specialty => "Select specialty",
            BookingStep::Doctor => "Select doctor",
            BookingStep::DateTime => "Pick date and time",
            BookingStep::Review => "Review and confirm",
        }
    }
}

impl std::fmt::Display for BookingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BookingStep::Clinic => "clinic",
            BookingStep::Specialty => "specialty",
            BookingStep::Doctor => "doctor",
            BookingStep::DateTime => "date/time",
            BookingStep::Review => "review",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_follow_declaration_order() {
        for (i, step) in BookingStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(BookingStep::from_index(i), Some(*step));
        }
        assert_eq!(BookingStep::from_index(5), None);
    }

    #[test]
    fn next_and_prev_stop_at_the_ends() {
        assert_eq!(BookingStep::Clinic.prev(), None);
        assert_eq!(BookingStep::Review.next(), None);
        assert_eq!(BookingStep::Doctor.next(), Some(BookingStep::DateTime));
        assert_eq!(BookingStep::Doctor.prev(), Some(BookingStep::Specialty));
    }
}
