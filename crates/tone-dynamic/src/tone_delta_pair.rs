//! Minimum tone separation between two related roles.
//!
//! A container and its accent ("primary_container" and "primary") have to
//! stay visually distinct even when contrast rules push them toward each
//! other. A pair names both roles, how far apart they must be and which one
//! goes which way.

use crate::role::Role;

/// Which member of a pair sits on which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TonePolarity {
    /// Role A is darker than role B.
    Darker,
    /// Role A is lighter than role B.
    Lighter,
    /// Role A is lighter in light mode, darker in dark mode.
    RelativeDarker,
    /// Role A is darker in light mode, lighter in dark mode.
    RelativeLighter,
    /// Role A is closer in tone to the background.
    Nearer,
    /// Role A is further in tone from the background.
    Farther,
}

/// How strictly the delta is enforced (2025 rules only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaConstraint {
    /// Exactly `delta` apart.
    #[default]
    Exact,
    /// At most `delta` apart.
    Nearer,
    /// At least `delta` apart.
    Farther,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneDeltaPair {
    pub role_a: Role,
    pub role_b: Role,
    /// Tone separation, >= 0.
    pub delta: f64,
    pub polarity: TonePolarity,
    /// Move both members out of the awkward tone zone together.
    pub stay_together: bool,
    pub constraint: DeltaConstraint,
}

impl ToneDeltaPair {
    #[must_use]
    pub const fn new(
        role_a: Role,
        role_b: Role,
        delta: f64,
        polarity: TonePolarity,
        stay_together: bool,
    ) -> Self {
        Self {
            role_a,
            role_b,
            delta,
            polarity,
            stay_together,
            constraint: DeltaConstraint::Exact,
        }
    }

    #[must_use]
    pub const fn with_constraint(mut self, constraint: DeltaConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// The member that isn't `role`.
    #[must_use]
    pub fn partner_of(&self, role: Role) -> Role {
        if self.role_a == role {
            self.role_b
        } else {
            self.role_a
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_exact() {
        let pair = ToneDeltaPair::new(
            Role::PrimaryFixedDim,
            Role::PrimaryFixed,
            5.0,
            TonePolarity::Darker,
            true,
        );
        assert_eq!(pair.constraint, DeltaConstraint::Exact);
        assert_eq!(
            pair.with_constraint(DeltaConstraint::Farther).constraint,
            DeltaConstraint::Farther
        );
    }

    #[test]
    fn partner_lookup() {
        let pair = ToneDeltaPair::new(
            Role::PrimaryContainer,
            Role::Primary,
            10.0,
            TonePolarity::Nearer,
            false,
        );
        assert_eq!(pair.partner_of(Role::Primary), Role::PrimaryContainer);
        assert_eq!(pair.partner_of(Role::PrimaryContainer), Role::Primary);
    }
}
