/// Binary state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Spin {
    Down = -1,
    Up = 1,
}

impl Spin {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }

    #[inline]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Sign of `x` as a spin, with `sign(0) = Up`.
    #[inline]
    pub fn from_sign(x: f64) -> Self {
        if x < 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

impl TryFrom<i64> for Spin {
    type Error = i64;
    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            -1 => Ok(Self::Down),
            1 => Ok(Self::Up),
            _ => Err(v),
        }
    }
}

impl From<Spin> for i8 {
    fn from(s: Spin) -> Self {
        s.value()
    }
}

/// Raw `i8` slot value back into a spin. Slots only ever hold ±1.
#[inline]
pub(crate) fn spin_of(v: i8) -> Spin {
    if v < 0 {
        Spin::Down
    } else {
        Spin::Up
    }
}
