//! Management view of reservations.
//!
//! Three record shapes share one wire form. Each level adds fields on top of
//! the one below:
//!
//! ```text
//! ReservationMng         id, slice, type, window, state, resources
//!   TicketReservationMng + broker, ticket properties, renewal
//!     LeaseReservationMng  + authority, join state, leased units, predecessors
//! ```
//!
//! The `name` key tells them apart. [`ReservationMng::from_mapping`] is the
//! only place that looks at it to choose a shape.

use crate::error::CodecError;
use crate::fields::{FieldReader, MappingWriter, NAME_KEY, Record};
use crate::records::{ReservationPredecessorRecord, ResourceSetRecord, SliceRecord, TermRecord};
use crate::value::{Mapping, Properties};

pub const RESERVATION_TAG: &str = "ReservationMng";
pub const TICKET_RESERVATION_TAG: &str = "TicketReservationMng";
pub const LEASE_RESERVATION_TAG: &str = "LeaseReservationMng";

/// Which level of the family a reservation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationKind {
    Base,
    Ticket,
    Lease,
}

impl ReservationKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ReservationKind::Base => RESERVATION_TAG,
            ReservationKind::Ticket => TICKET_RESERVATION_TAG,
            ReservationKind::Lease => LEASE_RESERVATION_TAG,
        }
    }

    /// Anything other than the ticket or lease tag, including no tag at all,
    /// is the base kind.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(LEASE_RESERVATION_TAG) => ReservationKind::Lease,
            Some(TICKET_RESERVATION_TAG) => ReservationKind::Ticket,
            _ => ReservationKind::Base,
        }
    }
}

/// Fields every reservation carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationCore {
    pub reservation_id: String,
    pub slice_id: Option<String>,
    /// Resource type.
    pub rtype: Option<String>,
    pub notices: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub requested_end: Option<i64>,
    pub units: Option<i64>,
    pub state: Option<i32>,
    pub pending_state: Option<i32>,
    pub local_properties: Option<Properties>,
    pub config_properties: Option<Properties>,
    pub request_properties: Option<Properties>,
    pub resource_properties: Option<Properties>,
    pub sequence: Option<i64>,
    /// Full slice, when the sender has it rather than just `slice_id`.
    pub slice: Option<SliceRecord>,
    pub term: Option<TermRecord>,
    pub resource_set: Option<ResourceSetRecord>,
}

impl ReservationCore {
    pub fn new(reservation_id: impl Into<String>) -> Self {
        Self {
            reservation_id: reservation_id.into(),
            ..Default::default()
        }
    }
}

impl Record for ReservationCore {
    const RECORD: &'static str = RESERVATION_TAG;

    /// Does not look at `name`: the base shape is the fallback for every tag.
    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            reservation_id: fields.required_str("reservation_id")?,
            slice_id: fields.optional_str("slice_id")?,
            rtype: fields.optional_str("rtype")?,
            notices: fields.optional_str("notices")?,
            start: fields.optional_int("start")?,
            end: fields.optional_int("end")?,
            requested_end: fields.optional_int("requested_end")?,
            units: fields.optional_int("units")?,
            state: fields.optional_i32("state")?,
            pending_state: fields.optional_i32("pending_state")?,
            local_properties: fields.optional_properties("local_properties")?,
            config_properties: fields.optional_properties("config_properties")?,
            request_properties: fields.optional_properties("request_properties")?,
            resource_properties: fields.optional_properties("resource_properties")?,
            sequence: fields.optional_int("sequence")?,
            slice: fields.optional_record("slice")?,
            term: fields.optional_record("term")?,
            resource_set: fields.optional_record_or_null_sentinel("resource_set")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::tagged(RESERVATION_TAG)
            .put("reservation_id", self.reservation_id.as_str())
            .put_opt("slice_id", self.slice_id.clone())
            .put_opt("rtype", self.rtype.clone())
            .put_opt("notices", self.notices.clone())
            .put_opt("start", self.start)
            .put_opt("end", self.end)
            .put_opt("requested_end", self.requested_end)
            .put_opt("units", self.units)
            .put_opt("state", self.state)
            .put_opt("pending_state", self.pending_state)
            .put_opt("local_properties", self.local_properties.clone())
            .put_opt("config_properties", self.config_properties.clone())
            .put_opt("request_properties", self.request_properties.clone())
            .put_opt("resource_properties", self.resource_properties.clone())
            .put_opt("sequence", self.sequence)
            .put_opt_record("slice", self.slice.as_ref())
            .put_opt_record("term", self.term.as_ref())
            .put_opt_record("resource_set", self.resource_set.as_ref())
            .finish()
    }
}

/// A reservation holding a broker-issued ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketReservation {
    pub core: ReservationCore,
    pub broker: Option<String>,
    /// Ticket properties.
    pub ticket: Option<Properties>,
    pub renewable: Option<bool>,
    pub renew_time: Option<i64>,
}

impl TicketReservation {
    pub fn new(core: ReservationCore) -> Self {
        Self {
            core,
            ..Default::default()
        }
    }

    fn decode_fields(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        Ok(Self {
            core: ReservationCore::from_mapping(mapping)?,
            broker: fields.optional_str("broker")?,
            ticket: fields.optional_properties("ticket")?,
            renewable: fields.optional_bool("renewable")?,
            renew_time: fields.optional_int("renew_time")?,
        })
    }
}

impl Record for TicketReservation {
    const RECORD: &'static str = TICKET_RESERVATION_TAG;

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        FieldReader::new(Self::RECORD, mapping).expect_discriminator(TICKET_RESERVATION_TAG)?;
        Self::decode_fields(mapping)
    }

    fn to_mapping(&self) -> Mapping {
        MappingWriter::new()
            .extend(self.core.to_mapping())
            .put(NAME_KEY, TICKET_RESERVATION_TAG)
            .put_opt("broker", self.broker.clone())
            .put_opt("ticket", self.ticket.clone())
            .put_opt("renewable", self.renewable)
            .put_opt("renew_time", self.renew_time)
            .finish()
    }
}

/// A ticketed reservation that has been redeemed at an authority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseReservation {
    pub ticket: TicketReservation,
    pub authority: Option<String>,
    pub join_state: Option<i32>,
    pub leased_units: Option<i64>,
    /// Reservations that must be redeemed first, in order.
    pub redeem_processors: Vec<ReservationPredecessorRecord>,
}

impl LeaseReservation {
    pub fn new(ticket: TicketReservation) -> Self {
        Self {
            ticket,
            ..Default::default()
        }
    }

    pub fn core(&self) -> &ReservationCore {
        &self.ticket.core
    }
}

impl Record for LeaseReservation {
    const RECORD: &'static str = LEASE_RESERVATION_TAG;

    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let fields = FieldReader::new(Self::RECORD, mapping);
        fields.expect_discriminator(LEASE_RESERVATION_TAG)?;
        Ok(Self {
            ticket: TicketReservation::decode_fields(mapping)?,
            authority: fields.optional_str("authority")?,
            join_state: fields.optional_i32("join_state")?,
            leased_units: fields.optional_int("leased_units")?,
            redeem_processors: fields.record_list("redeem_processors")?,
        })
    }

    fn to_mapping(&self) -> Mapping {
        let predecessors = (!self.redeem_processors.is_empty())
            .then_some(self.redeem_processors.as_slice());
        MappingWriter::new()
            .extend(self.ticket.to_mapping())
            .put(NAME_KEY, LEASE_RESERVATION_TAG)
            .put_opt("authority", self.authority.clone())
            .put_opt("join_state", self.join_state)
            .put_opt("leased_units", self.leased_units)
            .put_opt_records("redeem_processors", predecessors)
            .finish()
    }
}

/// A reservation of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationMng {
    Base(ReservationCore),
    Ticket(TicketReservation),
    Lease(LeaseReservation),
}

impl ReservationMng {
    pub fn kind(&self) -> ReservationKind {
        match self {
            ReservationMng::Base(_) => ReservationKind::Base,
            ReservationMng::Ticket(_) => ReservationKind::Ticket,
            ReservationMng::Lease(_) => ReservationKind::Lease,
        }
    }

    pub fn core(&self) -> &ReservationCore {
        match self {
            ReservationMng::Base(core) => core,
            ReservationMng::Ticket(ticket) => &ticket.core,
            ReservationMng::Lease(lease) => lease.core(),
        }
    }

    pub fn core_mut(&mut self) -> &mut ReservationCore {
        match self {
            ReservationMng::Base(core) => core,
            ReservationMng::Ticket(ticket) => &mut ticket.core,
            ReservationMng::Lease(lease) => &mut lease.ticket.core,
        }
    }

    pub fn reservation_id(&self) -> &str {
        &self.core().reservation_id
    }

    /// Ticket fields, present on ticket and lease reservations.
    pub fn as_ticket(&self) -> Option<&TicketReservation> {
        match self {
            ReservationMng::Base(_) => None,
            ReservationMng::Ticket(ticket) => Some(ticket),
            ReservationMng::Lease(lease) => Some(&lease.ticket),
        }
    }

    pub fn as_lease(&self) -> Option<&LeaseReservation> {
        match self {
            ReservationMng::Lease(lease) => Some(lease),
            _ => None,
        }
    }

    pub fn authority(&self) -> Option<&str> {
        self.as_lease().and_then(|l| l.authority.as_deref())
    }

    pub fn join_state(&self) -> Option<i32> {
        self.as_lease().and_then(|l| l.join_state)
    }

    pub fn leased_units(&self) -> Option<i64> {
        self.as_lease().and_then(|l| l.leased_units)
    }

    pub fn broker(&self) -> Option<&str> {
        self.as_ticket().and_then(|t| t.broker.as_deref())
    }
}

impl Record for ReservationMng {
    const RECORD: &'static str = RESERVATION_TAG;

    /// Chooses the shape from the `name` key.
    fn from_mapping(mapping: &Mapping) -> Result<Self, CodecError> {
        let tag = FieldReader::new(Self::RECORD, mapping).discriminator();
        Ok(match ReservationKind::from_tag(tag) {
            ReservationKind::Lease => ReservationMng::Lease(LeaseReservation::from_mapping(mapping)?),
            ReservationKind::Ticket => {
                ReservationMng::Ticket(TicketReservation::from_mapping(mapping)?)
            }
            ReservationKind::Base => ReservationMng::Base(ReservationCore::from_mapping(mapping)?),
        })
    }

    fn to_mapping(&self) -> Mapping {
        match self {
            ReservationMng::Base(core) => core.to_mapping(),
            ReservationMng::Ticket(ticket) => ticket.to_mapping(),
            ReservationMng::Lease(lease) => lease.to_mapping(),
        }
    }
}

impl Default for ReservationMng {
    fn default() -> Self {
        ReservationMng::Base(ReservationCore::default())
    }
}

impl From<ReservationCore> for ReservationMng {
    fn from(core: ReservationCore) -> Self {
        ReservationMng::Base(core)
    }
}

impl From<TicketReservation> for ReservationMng {
    fn from(ticket: TicketReservation) -> Self {
        ReservationMng::Ticket(ticket)
    }
}

impl From<LeaseReservation> for ReservationMng {
    fn from(lease: LeaseReservation) -> Self {
        ReservationMng::Lease(lease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn core() -> ReservationCore {
        ReservationCore {
            reservation_id: "abcd123".into(),
            slice_id: Some("slice_1".into()),
            rtype: Some("site.baremetalce".into()),
            notices: Some("noice".into()),
            start: Some(1264827600000),
            end: Some(1927515600000),
            requested_end: Some(1927515600000),
            state: Some(2),
            pending_state: Some(1),
            ..Default::default()
        }
    }

    fn ticket() -> TicketReservation {
        let mut ticket = TicketReservation::new(core());
        ticket.broker = Some("broker".into());
        ticket.renewable = Some(true);
        ticket.renew_time = Some(1927515600000);
        ticket
    }

    fn lease() -> LeaseReservation {
        let mut lease = LeaseReservation::new(ticket());
        lease.authority = Some("site-am".into());
        lease.join_state = Some(3);
        lease.leased_units = Some(4);
        lease
    }

    #[test]
    fn most_derived_tag_wins() {
        let mapping = lease().to_mapping();
        assert_eq!(
            mapping.get(NAME_KEY),
            Some(&Value::String(LEASE_RESERVATION_TAG.into()))
        );
        // Fields from every level are present.
        assert!(mapping.contains_key("rtype"));
        assert!(mapping.contains_key("broker"));
        assert!(mapping.contains_key("authority"));
    }

    #[test]
    fn dispatch_by_tag() {
        let base = ReservationMng::from_mapping(&core().to_mapping()).unwrap();
        assert_eq!(base.kind(), ReservationKind::Base);
        assert!(base.as_ticket().is_none());

        let ticketed = ReservationMng::from_mapping(&ticket().to_mapping()).unwrap();
        assert_eq!(ticketed.kind(), ReservationKind::Ticket);
        assert_eq!(ticketed.broker(), Some("broker"));
        assert!(ticketed.as_lease().is_none());
        assert_eq!(ticketed.authority(), None);

        let leased = ReservationMng::from_mapping(&lease().to_mapping()).unwrap();
        assert_eq!(leased.kind(), ReservationKind::Lease);
        assert_eq!(leased.authority(), Some("site-am"));
        assert_eq!(leased.join_state(), Some(3));
        assert_eq!(leased.leased_units(), Some(4));
        assert_eq!(leased.broker(), Some("broker"));
    }

    #[test]
    fn unknown_tag_falls_back_to_base() {
        let mut mapping = ticket().to_mapping();
        mapping.insert(NAME_KEY.into(), Value::String("SomethingElse".into()));
        let decoded = ReservationMng::from_mapping(&mapping).unwrap();
        assert_eq!(decoded, ReservationMng::Base(core()));

        mapping.remove(NAME_KEY);
        let decoded = ReservationMng::from_mapping(&mapping).unwrap();
        assert_eq!(decoded.kind(), ReservationKind::Base);
    }

    #[test]
    fn typed_decoders_reject_other_tags() {
        let mapping = ticket().to_mapping();
        assert_eq!(
            LeaseReservation::from_mapping(&mapping),
            Err(CodecError::Decode {
                expected: LEASE_RESERVATION_TAG,
                found: Some(TICKET_RESERVATION_TAG.into()),
            })
        );
        assert!(TicketReservation::from_mapping(&lease().to_mapping()).is_err());
    }

    #[test]
    fn predecessors_keep_order() {
        let mut lease = lease();
        for id in ["pred-1", "pred-2"] {
            lease.redeem_processors.push(ReservationPredecessorRecord {
                reservation_id: id.into(),
                filter: None,
            });
        }
        let decoded = LeaseReservation::from_mapping(&lease.to_mapping()).unwrap();
        assert_eq!(decoded.redeem_processors.len(), 2);
        assert_eq!(decoded.redeem_processors[0].reservation_id, "pred-1");
        assert_eq!(decoded, lease);
    }

    #[test]
    fn ticketing_fields_on_the_base() {
        let mut slice = SliceRecord::new("test_slice");
        slice.guid = Some("slice-12".into());
        let mut term = TermRecord::new(1593854111999, 1593854111999);
        term.new_start_time = Some(1593854111999);
        let mut original = ReservationCore::new("res123");
        original.sequence = Some(1);
        original.slice = Some(slice);
        original.term = Some(term);
        original.resource_set = Some(ResourceSetRecord::new(0, "type1"));

        let decoded = ReservationMng::from_mapping(&original.to_mapping()).unwrap();
        assert_eq!(decoded, ReservationMng::Base(original));
    }

    #[test]
    fn null_resource_set_sentinel() {
        let mut mapping = ReservationCore::new("res123").to_mapping();
        mapping.insert("resource_set".into(), Value::String("null".into()));
        let decoded = ReservationCore::from_mapping(&mapping).unwrap();
        assert!(decoded.resource_set.is_none());
    }

    #[test]
    fn empty_predecessors_are_omitted() {
        let mapping = lease().to_mapping();
        assert!(!mapping.contains_key("redeem_processors"));
    }
}
