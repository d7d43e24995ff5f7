use std::fmt;

/// Amount of Korean won. Whole units only, the machine never handles fractions.
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Won(i64);

impl Won {
    pub const ZERO: Won = Won(0);

    pub const fn new(value: i64) -> Self {
        Won(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for Won {
    fn from(value: i64) -> Self {
        Won(value)
    }
}

impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}{grouped}₩")
    }
}

impl std::ops::Add for Won {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Won(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for Won {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Won(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Mul<u64> for Won {
    type Output = Self;

    fn mul(self, rhs: u64) -> Self::Output {
        match i64::try_from(rhs) {
            Ok(rhs) => Won(self.0.saturating_mul(rhs)),
            Err(_) if self.0 == 0 => Won::ZERO,
            Err(_) if self.0 > 0 => Won(i64::MAX),
            Err(_) => Won(i64::MIN),
        }
    }
}

impl std::ops::AddAssign for Won {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Won {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::iter::Sum for Won {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Won::ZERO, |acc, w| acc + w)
    }
}
