use actorbus_core::*;

fn auth() -> AuthRecord {
    AuthRecord::new("testactor", "testguid")
}

fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn lease() -> LeaseReservation {
    let mut core = ReservationCore::new("lease-1");
    core.slice_id = Some("slice-1".into());
    core.rtype = Some("site.vm".into());
    core.start = Some(1264827600000);
    core.end = Some(1927515600000);
    core.state = Some(4);
    let mut ticket = TicketReservation::new(core);
    ticket.broker = Some("broker".into());
    ticket.ticket = Some(props(&[("units", "1")]));
    let mut lease = LeaseReservation::new(ticket);
    lease.authority = Some("site-am".into());
    lease.join_state = Some(2);
    lease.leased_units = Some(1);
    lease
}

fn ticketing_reservation() -> ReservationMng {
    let data = ResourceDataRecord {
        request_properties: Some(props(&[("ram", "2")])),
        ..Default::default()
    };
    let mut resource_set = ResourceSetRecord::new(1, "site.vm");
    resource_set.resource_data = Some(data);
    resource_set.concrete = Some(vec![0x80, 0x04, 0x95, 0x00, 0xff]);
    let mut core = ReservationCore::new("res123");
    core.sequence = Some(1);
    core.slice = Some(SliceRecord::new("test_slice"));
    core.term = Some(TermRecord::new(1593854111999, 1593854111999));
    core.resource_set = Some(resource_set);
    core.into()
}

/// One fully populated envelope of every type.
fn every_variant() -> Vec<Message> {
    let mut query = Query::new("m-query");
    query.callback_topic = "topic".into();
    query.properties = props(&[("abc", "def")]);
    query.auth = Some(auth());

    let mut query_result = QueryResult::new("m-query-result");
    query_result.request_id = "m-query".into();
    query_result.properties = props(&[("abc", "def")]);

    let mut failed = FailedRpc::new("m-failed");
    failed.request_id = "m-claim".into();
    failed.request_type = 2;
    failed.reservation_id = Some("res123".into());
    failed.error_details = "broker unavailable".into();
    failed.auth = Some(auth());

    let mut claim_resources = ClaimResources::new("m-claim-resources");
    claim_resources.guid = "guid1".into();
    claim_resources.broker_id = "broker11".into();
    claim_resources.reservation_id = "res123".into();
    claim_resources.slice_id = Some("slice-1".into());
    claim_resources.auth = Some(auth());
    claim_resources.callback_topic = "topic".into();

    let mut claim_response = ClaimResourcesResponse::new("m-claim-response");
    claim_response.reservation = Some(lease().into());

    let mut claim = Claim::new("m-claim");
    claim.callback_topic = "topic".into();
    claim.reservation = ticketing_reservation();
    claim.auth = Some(auth());

    let mut redeem = Redeem::new("m-redeem");
    redeem.callback_topic = "topic".into();
    redeem.reservation = ticketing_reservation();
    redeem.auth = Some(auth());

    let mut update_ticket = UpdateTicket::new("m-update-ticket");
    update_ticket.callback_topic = "topic".into();
    update_ticket.reservation = ticketing_reservation();
    update_ticket.update_data = UpdateDataRecord {
        message: Some("extended".into()),
        failed: false,
    };
    update_ticket.auth = Some(auth());

    let mut get_slices = GetSlicesRequest::new("m-get-slices");
    get_slices.callback_topic = "topic".into();
    get_slices.guid = "guid".into();
    get_slices.slice_id = Some("slice-1".into());
    get_slices.auth = Some(auth());

    let mut slice = SliceRecord::new("abc");
    slice.slice_id = Some("slice-1".into());
    slice.owner = Some(auth());
    slice.client_slice = Some(false);

    let mut get_slices_response = GetSlicesResponse::new("m-get-slices-response");
    get_slices_response.slices = Some(vec![slice.clone()]);

    let mut add_slice = AddSlice::new("m-add-slice");
    add_slice.callback_topic = "topic".into();
    add_slice.guid = "guid".into();
    add_slice.slice_obj = Some(slice.clone());
    add_slice.auth = Some(auth());

    let mut remove_slice = RemoveSlice::new("m-remove-slice");
    remove_slice.callback_topic = "topic".into();
    remove_slice.guid = "guid".into();
    remove_slice.slice_id = Some("slice-1".into());
    remove_slice.auth = Some(auth());

    let mut update_slice = UpdateSlice::new("m-update-slice");
    update_slice.callback_topic = "topic".into();
    update_slice.guid = "guid".into();
    update_slice.slice_obj = Some(slice.clone());
    update_slice.auth = Some(auth());

    let mut result_slice = ResultSlice::new("m-result-slice");
    result_slice.status = ResultRecord::error(-1, "no such slice");

    let mut get_reservations = GetReservationsRequest::new("m-get-reservations");
    get_reservations.callback_topic = "topic".into();
    get_reservations.guid = "guid".into();
    get_reservations.reservation_state = Some(4);
    get_reservations.auth = Some(auth());

    let mut get_reservations_response = GetReservationsResponse::new("m-get-reservations-response");
    get_reservations_response.reservations = Some(vec![
        ReservationCore::new("r1").into(),
        lease().into(),
    ]);

    let mut get_states = GetReservationsStateRequest::new("m-get-states");
    get_states.callback_topic = "topic".into();
    get_states.guid = "guid".into();
    get_states.reservation_ids = Some(vec!["r1".into(), "r2".into()]);

    let state = ReservationStateRecord {
        reservation_id: "r1".into(),
        state: 4,
        pending_state: Some(1),
    };
    let mut get_states_response = GetReservationsStateResponse::new("m-get-states-response");
    get_states_response.reservation_states = Some(vec![state.clone()]);

    let mut add_reservation = AddReservation::new("m-add-reservation");
    add_reservation.callback_topic = "topic".into();
    add_reservation.guid = "guid".into();
    add_reservation.reservation_obj = Some(ReservationCore::new("r1").into());
    add_reservation.auth = Some(auth());

    let mut remove_reservation = RemoveReservation::new("m-remove-reservation");
    remove_reservation.callback_topic = "topic".into();
    remove_reservation.guid = "guid".into();
    remove_reservation.reservation_id = Some("r1".into());
    remove_reservation.auth = Some(auth());

    let mut close = CloseReservations::new("m-close");
    close.callback_topic = "topic".into();
    close.guid = "guid".into();
    close.slice_id = Some("slice-1".into());
    close.auth = Some(auth());

    let mut update_reservation = UpdateReservation::new("m-update-reservation");
    update_reservation.callback_topic = "topic".into();
    update_reservation.guid = "guid".into();
    update_reservation.reservation_obj = Some(lease().into());
    update_reservation.auth = Some(auth());

    let mut result_reservation = ResultReservation::new("m-result-reservation");
    result_reservation.reservations = Some(Vec::new());

    let mut result_state = ResultReservationState::new("m-result-state");
    result_state.reservation_states = Some(vec![state]);

    let mut status = StatusResponse::new("m-status");
    status.result = Some("done".into());

    vec![
        query.into(),
        query_result.into(),
        failed.into(),
        claim_resources.into(),
        claim_response.into(),
        claim.into(),
        redeem.into(),
        update_ticket.into(),
        get_slices.into(),
        get_slices_response.into(),
        add_slice.into(),
        remove_slice.into(),
        update_slice.into(),
        result_slice.into(),
        get_reservations.into(),
        get_reservations_response.into(),
        get_states.into(),
        get_states_response.into(),
        add_reservation.into(),
        remove_reservation.into(),
        close.into(),
        update_reservation.into(),
        result_reservation.into(),
        result_state.into(),
        status.into(),
    ]
}

#[test]
fn every_variant_roundtrips_through_the_registry() {
    let messages = every_variant();
    assert_eq!(messages.len(), MessageType::ALL.len());
    for message in messages {
        let mapping = message.to_mapping().unwrap();
        assert_eq!(
            mapping.get(NAME_KEY),
            Some(&Value::String(message.discriminator().into()))
        );
        assert_eq!(
            mapping.get(MESSAGE_ID_KEY),
            Some(&Value::String(message.message_id().into()))
        );
        let decoded = decode(&mapping).unwrap();
        assert_eq!(decoded, message, "{}", message.discriminator());
    }
}

#[test]
fn every_variant_roundtrips_through_json() {
    for message in every_variant() {
        let json = serde_json::to_string(&message.to_mapping().unwrap()).unwrap();
        let mapping: Mapping = serde_json::from_str(&json).unwrap();
        assert_eq!(decode(&mapping).unwrap(), message);
    }
}

#[test]
fn decoding_under_the_wrong_name_fails() {
    for message in every_variant() {
        let mapping = message.to_mapping().unwrap();
        let other = MessageType::ALL
            .into_iter()
            .find(|t| *t != message.message_type())
            .unwrap();
        let mut target = Message::empty(other);
        assert_eq!(
            target.populate_from_mapping(&mapping),
            Err(CodecError::Decode {
                expected: other.as_str(),
                found: Some(message.discriminator().into()),
            })
        );
    }
}

#[test]
fn unset_optionals_are_omitted() {
    let mut claim = ClaimResources::new("m");
    claim.guid = "g".into();
    claim.broker_id = "b".into();
    claim.reservation_id = "r".into();
    claim.callback_topic = "t".into();
    let mapping = claim.to_mapping().unwrap();
    let keys: Vec<_> = mapping.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "broker_id",
            "callback_topic",
            "guid",
            "message_id",
            "name",
            "reservation_id"
        ]
    );
}

#[test]
fn registry_rejects_unknown_types() {
    let mut mapping = Mapping::new();
    mapping.insert(NAME_KEY.into(), "NotARealType".into());
    mapping.insert(MESSAGE_ID_KEY.into(), "m".into());
    assert_eq!(
        Registry::global().decode(&mapping),
        Err(CodecError::UnknownMessageType("NotARealType".into()))
    );
}

#[test]
fn registry_dispatches_embedded_reservations() {
    let mut response = ClaimResourcesResponse::new("m");
    response.reservation = Some(lease().into());
    let Message::ClaimResourcesResponse(decoded) = decode(&response.to_mapping().unwrap()).unwrap()
    else {
        panic!("wrong variant");
    };
    let reservation = decoded.reservation.unwrap();
    assert_eq!(reservation.authority(), Some("site-am"));
    assert_eq!(reservation.join_state(), Some(2));
    assert_eq!(reservation.leased_units(), Some(1));

    let ticket = TicketReservation::new(ReservationCore::new("t1"));
    response.reservation = Some(ticket.into());
    let Message::ClaimResourcesResponse(decoded) = decode(&response.to_mapping().unwrap()).unwrap()
    else {
        panic!("wrong variant");
    };
    let reservation = decoded.reservation.unwrap();
    assert_eq!(reservation.kind(), ReservationKind::Ticket);
    assert!(reservation.as_ticket().is_some());
    assert!(reservation.as_lease().is_none());
}

#[test]
fn scenario_query_with_credentials() {
    let mut query = Query::new("msg1");
    query.callback_topic = "topic".into();
    query.properties = props(&[("abc", "def")]);
    query.auth = Some(auth());

    let mapping = query.to_mapping().unwrap();
    let decoded = Query::from_mapping(&mapping).unwrap();
    assert_eq!(decoded.discriminator(), "Query");
    assert_eq!(decoded.message_id, "msg1");
    assert_eq!(decoded.callback_topic, "topic");
    assert_eq!(decoded.properties, props(&[("abc", "def")]));
    assert_eq!(decoded.auth, Some(auth()));
}

#[test]
fn scenario_remove_reservation_without_id() {
    let mut remove = RemoveReservation::new("msg1");
    remove.callback_topic = "topic".into();
    remove.guid = "guid".into();
    remove.auth = Some(auth());
    assert_eq!(
        remove.to_mapping(),
        Err(CodecError::Validation {
            message_type: "RemoveReservation",
        })
    );
}

#[test]
fn scenario_null_slice_id_sentinel() {
    let mapping: Mapping = [
        ("name", "ClaimResources"),
        ("message_id", "m"),
        ("guid", "g"),
        ("broker_id", "b"),
        ("reservation_id", "r"),
        ("callback_topic", "t"),
        ("slice_id", "null"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), Value::from(v)))
    .collect();

    let Message::ClaimResources(claim) = decode(&mapping).unwrap() else {
        panic!("wrong variant");
    };
    assert_eq!(claim.slice_id, None);
    assert_eq!(claim.guid, "g");
    // The sentinel is never written back.
    assert!(!claim.to_mapping().unwrap().contains_key("slice_id"));
}

#[test]
fn scenario_lease_with_two_predecessors() {
    let mut lease = lease();
    lease.redeem_processors = vec![
        ReservationPredecessorRecord {
            reservation_id: "pred-1".into(),
            filter: Some(props(&[("unit.vlan.tag", "unit.vlan.tag")])),
        },
        ReservationPredecessorRecord {
            reservation_id: "pred-2".into(),
            filter: None,
        },
    ];
    let decoded = LeaseReservation::from_mapping(&lease.to_mapping()).unwrap();
    assert_eq!(decoded.redeem_processors.len(), 2);
    assert_eq!(decoded.redeem_processors, lease.redeem_processors);
}

#[test]
fn scenario_untagged_reservation_in_claim_response() {
    let mut reservation = Mapping::new();
    reservation.insert("reservation_id".into(), "r1".into());
    reservation.insert("broker".into(), "broker".into());
    reservation.insert(NAME_KEY.into(), "SomeOtherReservation".into());

    let mut mapping = ClaimResourcesResponse::new("m").to_mapping().unwrap();
    mapping.insert("reservation".into(), Value::Map(reservation));

    let decoded = ClaimResourcesResponse::from_mapping(&mapping).unwrap();
    let reservation = decoded.reservation.unwrap();
    assert_eq!(reservation.kind(), ReservationKind::Base);
    assert_eq!(reservation.reservation_id(), "r1");
    assert_eq!(reservation.broker(), None);
}

#[test]
fn failed_decode_never_half_populates() {
    let mut update = UpdateTicket::new("keep");
    update.callback_topic = "mine".into();
    let before = update.clone();

    let mut source = UpdateTicket::new("other");
    source.callback_topic = "theirs".into();
    let mut mapping = source.to_mapping().unwrap();
    mapping.insert("update_data".into(), "not a map".into());

    assert!(matches!(
        update.populate_from_mapping(&mapping),
        Err(CodecError::InvalidField {
            field: "update_data",
            ..
        })
    ));
    assert_eq!(update, before);
}
