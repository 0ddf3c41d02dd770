//! LocationState: the permission status together with the stored fix.

use serde::Serialize;

use super::{Coordinates, LocationStatus};
use crate::domain::foundation::{StateMachine, ValidationError};

/// Location state of one session.
///
/// # Invariants
///
/// - `position` is `Some` exactly when `status` is `Granted`
/// - transitions follow [`LocationStatus`]'s state machine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocationState {
    status: LocationStatus,
    position: Option<Coordinates>,
}

impl LocationState {
    /// A fresh, idle state without coordinates.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> LocationStatus {
        self.status
    }

    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    /// Coordinates, but only when the grant is in place.
    pub fn granted_position(&self) -> Option<Coordinates> {
        match self.status {
            LocationStatus::Granted => self.position,
            _ => None,
        }
    }

    /// Idle -> Requesting.
    pub fn begin_request(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(LocationStatus::Requesting)?;
        Ok(())
    }

    /// Requesting -> Granted, storing the fix.
    pub fn grant(&mut self, position: Coordinates) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(LocationStatus::Granted)?;
        self.position = Some(position);
        Ok(())
    }

    /// Idle or Requesting -> Denied. Position stays empty.
    pub fn deny(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(LocationStatus::Denied)?;
        self.position = None;
        Ok(())
    }
}

#[derive(Serialize)]
struct PositionView {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl Serialize for LocationState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let position = PositionView {
            latitude: self.position.map(|p| p.latitude()),
            longitude: self.position.map(|p| p.longitude()),
        };
        let mut state = serializer.serialize_struct("LocationState", 2)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("position", &position)?;
        state.end()
    }
}
