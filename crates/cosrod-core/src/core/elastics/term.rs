use nalgebra::Vector3;
use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Elastic energy split by contribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ElasticEnergy {
    pub bend: f64,
    pub stretch: f64,
    pub twist: f64,
}

impl ElasticEnergy {
    pub fn new(bend: f64, stretch: f64, twist: f64) -> Self {
        Self {
            bend,
            stretch,
            twist,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.bend + self.stretch + self.twist
    }

    /// `(bend, stretch, twist)`, the layout of the three-value energy output buffer.
    #[inline]
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.bend, self.stretch, self.twist)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.bend.is_finite() && self.stretch.is_finite() && self.twist.is_finite()
    }
}

impl Add for ElasticEnergy {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            bend: self.bend + rhs.bend,
            stretch: self.stretch + rhs.stretch,
            twist: self.twist + rhs.twist,
        }
    }
}

impl AddAssign for ElasticEnergy {
    fn add_assign(&mut self, rhs: Self) {
        self.bend += rhs.bend;
        self.stretch += rhs.stretch;
        self.twist += rhs.twist;
    }
}

impl Sub for ElasticEnergy {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            bend: self.bend - rhs.bend,
            stretch: self.stretch - rhs.stretch,
            twist: self.twist - rhs.twist,
        }
    }
}

impl Sum for ElasticEnergy {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
