//! The envelopes the loopback run sends, one of each kind a deployed actor
//! exchanges with its peers.

use actorbus_core::{
    AddSlice, AuthRecord, Claim, ClaimResources, CloseReservations, FailedRpc,
    GetReservationsRequest, GetReservationsResponse, GetSlicesRequest, GetSlicesResponse, Message,
    Properties, Query, QueryResult, Redeem, RemoveReservation, RemoveSlice, ReservationCore,
    ReservationMng, ResourceDataRecord, ResourceSetRecord, ResultRecord, SliceRecord,
    StatusResponse, TermRecord, UpdateDataRecord, UpdateReservation, UpdateSlice, UpdateTicket,
};

fn properties(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn auth() -> AuthRecord {
    AuthRecord::new("testactor", "testguid")
}

/// A reservation in the form the ticketing RPCs carry it.
fn ticketed_reservation() -> ReservationMng {
    let mut slice = SliceRecord::new("test_slice");
    slice.guid = Some("slice-12".into());

    let mut term = TermRecord::new(1593854111999, 1593854111999);
    term.new_start_time = Some(1593854111999);

    let mut resource_set = ResourceSetRecord::new(0, "type1");
    resource_set.resource_data = Some(ResourceDataRecord {
        request_properties: Some(properties(&[
            ("type", "site.vlan"),
            ("label", "Net AM"),
            ("attributescount", "1"),
            ("attribute.0.key", "resource.class.invfortype"),
            ("resource.class.invfortype.type", "6"),
            ("pool.name", "Net AM"),
        ])),
        ..Default::default()
    });
    // Opaque ticket blob; only its bytes matter here.
    resource_set.concrete = Some(b"\x80\x04\x95\xb9\x02\x00\x00\x00\x00\x00\x00\x8c\x16actor.core.core.Ticket".to_vec());

    let mut core = ReservationCore::new("res123");
    core.sequence = Some(1);
    core.slice = Some(slice);
    core.term = Some(term);
    core.resource_set = Some(resource_set);
    core.into()
}

fn managed_reservation() -> ReservationMng {
    ReservationCore {
        reservation_id: "abcd123".into(),
        rtype: Some("site.baremetalce".into()),
        notices: Some("noice".into()),
        slice_id: Some("slice_1".into()),
        start: Some(1264827600000),
        end: Some(1927515600000),
        requested_end: Some(1927515600000),
        state: Some(2),
        pending_state: Some(1),
        ..Default::default()
    }
    .into()
}

fn slice() -> SliceRecord {
    SliceRecord {
        slice_name: "abc".into(),
        slice_id: Some("11111".into()),
        owner: Some(auth()),
        description: Some("abcd".into()),
        config_properties: Some(Properties::new()),
        resource_type: Some("site.vm".into()),
        client_slice: Some(false),
        broker_client_slice: Some(false),
        ..Default::default()
    }
}

pub fn outgoing() -> Vec<Message> {
    let mut query = Query::new("msg1");
    query.callback_topic = "topic".into();
    query.properties = properties(&[("abc", "def")]);
    query.auth = Some(auth());

    let mut query_result = QueryResult::new("msg2");
    query_result.request_id = "req2".into();
    query_result.properties = properties(&[("abc", "def")]);
    query_result.auth = Some(auth());

    let mut failed_rpc = FailedRpc::new("msg3");
    failed_rpc.request_id = "req3".into();
    failed_rpc.reservation_id = Some("rsv_abc".into());
    failed_rpc.request_type = 1;
    failed_rpc.error_details = "test error message".into();
    failed_rpc.auth = Some(auth());

    let mut claim_resources = ClaimResources::new("test_claim_1");
    claim_resources.guid = "dummy-guid".into();
    claim_resources.auth = Some(auth());
    claim_resources.broker_id = "brokerid".into();
    claim_resources.reservation_id = "rsv_id".into();
    claim_resources.callback_topic = "test".into();

    let mut claim = Claim::new("msg4");
    claim.auth = Some(auth());
    claim.callback_topic = "test".into();
    claim.reservation = ticketed_reservation();

    let mut redeem = Redeem::new("msg4");
    redeem.callback_topic = "test".into();
    redeem.reservation = ticketed_reservation();

    let mut update_ticket = UpdateTicket::new("msg11");
    update_ticket.auth = Some(auth());
    update_ticket.callback_topic = "test".into();
    update_ticket.reservation = ticketed_reservation();
    update_ticket.update_data = UpdateDataRecord {
        message: None,
        failed: false,
    };

    let mut get_slices = GetSlicesRequest::new("msg11");
    get_slices.auth = Some(auth());
    get_slices.callback_topic = "test".into();
    get_slices.guid = "guid".into();

    let mut slices = GetSlicesResponse::new("msg11");
    slices.status = ResultRecord::ok();
    slices.slices = Some(vec![slice()]);

    let mut get_reservations = GetReservationsRequest::new("abc123");
    get_reservations.callback_topic = "test".into();
    get_reservations.guid = "guid".into();

    let mut reservations = GetReservationsResponse::new("abc123");
    reservations.status = ResultRecord::ok();
    reservations.reservations = Some(vec![managed_reservation()]);

    let mut remove_slice = RemoveSlice::new("msg1");
    remove_slice.guid = "guid1".into();
    remove_slice.slice_id = Some("slice1".into());
    remove_slice.callback_topic = "test_topic".into();
    remove_slice.auth = Some(auth());

    let mut status = StatusResponse::new("msg1");
    status.result = Some("abc".into());
    status.status = ResultRecord::ok();

    let mut add_slice = AddSlice::new("msg1");
    add_slice.guid = "guid1".into();
    add_slice.slice_obj = Some(slice());
    add_slice.callback_topic = "test_topic".into();
    add_slice.auth = Some(auth());

    let mut update_slice = UpdateSlice::new("msg1");
    update_slice.guid = "guid1".into();
    update_slice.slice_obj = Some(slice());
    update_slice.callback_topic = "test_topic".into();
    update_slice.auth = Some(auth());

    let mut remove_reservation = RemoveReservation::new("msg1");
    remove_reservation.guid = "guid1".into();
    remove_reservation.reservation_id = Some("rid1".into());
    remove_reservation.callback_topic = "test_topic".into();
    remove_reservation.auth = Some(auth());

    let mut close = CloseReservations::new("msg1");
    close.guid = "guid1".into();
    close.reservation_id = Some("rid1".into());
    close.callback_topic = "test_topic".into();
    close.auth = Some(auth());

    let mut update_reservation = UpdateReservation::new("msg1");
    update_reservation.guid = "guid1".into();
    update_reservation.reservation_obj = Some(managed_reservation());
    update_reservation.callback_topic = "test_topic".into();
    update_reservation.auth = Some(auth());

    vec![
        query.into(),
        query_result.into(),
        failed_rpc.into(),
        claim_resources.into(),
        claim.into(),
        redeem.into(),
        update_ticket.into(),
        get_slices.into(),
        slices.into(),
        get_reservations.into(),
        reservations.into(),
        remove_slice.into(),
        status.into(),
        add_slice.into(),
        update_slice.into(),
        remove_reservation.into(),
        close.into(),
        update_reservation.into(),
    ]
}
