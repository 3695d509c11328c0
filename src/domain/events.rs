//! Domain events published after a state change has been persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    AssessmentId, EquipmentCondition, EquipmentId, MemberId, MembershipTier, Money, RentalId,
    ReservationId,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    EquipmentRegistered {
        equipment_id: EquipmentId,
        occurred_at: DateTime<Utc>,
    },
    EquipmentSentToMaintenance {
        equipment_id: EquipmentId,
        occurred_at: DateTime<Utc>,
    },
    MaintenanceCompleted {
        equipment_id: EquipmentId,
        condition: EquipmentCondition,
        occurred_at: DateTime<Utc>,
    },
    MemberRegistered {
        member_id: MemberId,
        occurred_at: DateTime<Utc>,
    },
    MemberTierChanged {
        member_id: MemberId,
        from: MembershipTier,
        to: MembershipTier,
        occurred_at: DateTime<Utc>,
    },
    MemberDeactivated {
        member_id: MemberId,
        occurred_at: DateTime<Utc>,
    },
    RentalCreated {
        rental_id: RentalId,
        equipment_id: EquipmentId,
        member_id: MemberId,
        start: NaiveDate,
        end: NaiveDate,
        total_cost: Money,
        occurred_at: DateTime<Utc>,
    },
    RentalActivated {
        rental_id: RentalId,
        member_id: MemberId,
        occurred_at: DateTime<Utc>,
    },
    RentalExtended {
        rental_id: RentalId,
        member_id: MemberId,
        new_end: NaiveDate,
        occurred_at: DateTime<Utc>,
    },
    RentalReturned {
        rental_id: RentalId,
        equipment_id: EquipmentId,
        member_id: MemberId,
        late_fee: Money,
        damage_fee: Money,
        occurred_at: DateTime<Utc>,
    },
    RentalCancelled {
        rental_id: RentalId,
        member_id: MemberId,
        occurred_at: DateTime<Utc>,
    },
    RentalOverdue {
        rental_id: RentalId,
        member_id: MemberId,
        days_overdue: u32,
        occurred_at: DateTime<Utc>,
    },
    DamageAssessed {
        assessment_id: AssessmentId,
        rental_id: RentalId,
        member_id: MemberId,
        damage_fee: Money,
        occurred_at: DateTime<Utc>,
    },
    ReservationCreated {
        reservation_id: ReservationId,
        member_id: MemberId,
        occurred_at: DateTime<Utc>,
    },
    ReservationConfirmed {
        reservation_id: ReservationId,
        member_id: MemberId,
        occurred_at: DateTime<Utc>,
    },
    ReservationCancelled {
        reservation_id: ReservationId,
        member_id: MemberId,
        occurred_at: DateTime<Utc>,
    },
    ReservationFulfilled {
        reservation_id: ReservationId,
        rental_id: RentalId,
        member_id: MemberId,
        occurred_at: DateTime<Utc>,
    },
}

/// Discriminant of [`DomainEvent`], used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    EquipmentRegistered,
    EquipmentSentToMaintenance,
    MaintenanceCompleted,
    MemberRegistered,
    MemberTierChanged,
    MemberDeactivated,
    RentalCreated,
    RentalActivated,
    RentalExtended,
    RentalReturned,
    RentalCancelled,
    RentalOverdue,
    DamageAssessed,
    ReservationCreated,
    ReservationConfirmed,
    ReservationCancelled,
    ReservationFulfilled,
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::EquipmentRegistered { .. } => EventKind::EquipmentRegistered,
            Self::EquipmentSentToMaintenance { .. } => EventKind::EquipmentSentToMaintenance,
            Self::MaintenanceCompleted { .. } => EventKind::MaintenanceCompleted,
            Self::MemberRegistered { .. } => EventKind::MemberRegistered,
            Self::MemberTierChanged { .. } => EventKind::MemberTierChanged,
            Self::MemberDeactivated { .. } => EventKind::MemberDeactivated,
            Self::RentalCreated { .. } => EventKind::RentalCreated,
            Self::RentalActivated { .. } => EventKind::RentalActivated,
            Self::RentalExtended { .. } => EventKind::RentalExtended,
            Self::RentalReturned { .. } => EventKind::RentalReturned,
            Self::RentalCancelled { .. } => EventKind::RentalCancelled,
            Self::RentalOverdue { .. } => EventKind::RentalOverdue,
            Self::DamageAssessed { .. } => EventKind::DamageAssessed,
            Self::ReservationCreated { .. } => EventKind::ReservationCreated,
            Self::ReservationConfirmed { .. } => EventKind::ReservationConfirmed,
            Self::ReservationCancelled { .. } => EventKind::ReservationCancelled,
            Self::ReservationFulfilled { .. } => EventKind::ReservationFulfilled,
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Member the event concerns, if any.
    pub fn member_id(&self) -> Option<MemberId> {
        match self {
            Self::MemberRegistered { member_id, .. }
            | Self::MemberTierChanged { member_id, .. }
            | Self::MemberDeactivated { member_id, .. }
            | Self::RentalCreated { member_id, .. }
            | Self::RentalActivated { member_id, .. }
            | Self::RentalExtended { member_id, .. }
            | Self::RentalReturned { member_id, .. }
            | Self::RentalCancelled { member_id, .. }
            | Self::RentalOverdue { member_id, .. }
            | Self::DamageAssessed { member_id, .. }
            | Self::ReservationCreated { member_id, .. }
            | Self::ReservationConfirmed { member_id, .. }
            | Self::ReservationCancelled { member_id, .. }
            | Self::ReservationFulfilled { member_id, .. } => Some(*member_id),
            Self::EquipmentRegistered { .. }
            | Self::EquipmentSentToMaintenance { .. }
            | Self::MaintenanceCompleted { .. } => None,
        }
    }
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EquipmentRegistered => "EquipmentRegistered",
            Self::EquipmentSentToMaintenance => "EquipmentSentToMaintenance",
            Self::MaintenanceCompleted => "MaintenanceCompleted",
            Self::MemberRegistered => "MemberRegistered",
            Self::MemberTierChanged => "MemberTierChanged",
            Self::MemberDeactivated => "MemberDeactivated",
            Self::RentalCreated => "RentalCreated",
            Self::RentalActivated => "RentalActivated",
            Self::RentalExtended => "RentalExtended",
            Self::RentalReturned => "RentalReturned",
            Self::RentalCancelled => "RentalCancelled",
            Self::RentalOverdue => "RentalOverdue",
            Self::DamageAssessed => "DamageAssessed",
            Self::ReservationCreated => "ReservationCreated",
            Self::ReservationConfirmed => "ReservationConfirmed",
            Self::ReservationCancelled => "ReservationCancelled",
            Self::ReservationFulfilled => "ReservationFulfilled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_and_member() {
        let member_id = MemberId::new();
        let event = DomainEvent::RentalReturned {
            rental_id: RentalId::new(),
            equipment_id: EquipmentId::new(),
            member_id,
            late_fee: Money::ZERO,
            damage_fee: Money::from_dollars(50),
            occurred_at: Utc::now(),
        };

        assert_eq!(event.kind(), EventKind::RentalReturned);
        assert_eq!(event.event_type(), "RentalReturned");
        assert_eq!(event.member_id(), Some(member_id));
    }

    #[test]
    fn test_equipment_events_have_no_member() {
        let event = DomainEvent::EquipmentRegistered {
            equipment_id: EquipmentId::new(),
            occurred_at: Utc::now(),
        };
        assert_eq!(event.member_id(), None);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let event = DomainEvent::MemberDeactivated {
            member_id: MemberId::new(),
            occurred_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "MemberDeactivated");
    }
}
