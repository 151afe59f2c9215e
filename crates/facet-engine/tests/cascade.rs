//! Session-level scenarios with hand-ordered completions.

use facet_engine::{
    Command, Commands, FacetStatus, FilterSession, GateStatus, Message, ResultRegion, compose,
};
use facet_model::{
    Facet, FacetOption, FilterError, QueryDescriptor, SelectionSet, Selections, ValidationOutcome,
};
use proptest::prelude::*;

fn options(ids: &[i64]) -> Vec<FacetOption> {
    ids.iter()
        .map(|id| FacetOption::new(*id, format!("Option {id}")))
        .collect()
}

/// Mounts a session and completes the three seeding fetches.
fn mounted_session() -> FilterSession {
    let mut session = FilterSession::new();
    let seeded = session.update(Message::Mount);
    complete_all(&mut session, &seeded);
    session
}

fn complete_all(session: &mut FilterSession, commands: &Commands) {
    for ticket in commands.fetches() {
        session.update(Message::FacetLoaded {
            facet: ticket.facet,
            seq: ticket.seq,
            result: Ok(options(&[1, 2, 3])),
        });
    }
}

fn apply(session: &mut FilterSession) -> u64 {
    let commands = session.update(Message::Apply);
    match commands.iter().next() {
        Some(Command::Validate(ticket)) => ticket.id,
        other => panic!("expected validate command, got {other:?}"),
    }
}

#[test]
fn directional_cascade_skips_the_edited_facet() {
    let mut session = mounted_session();

    let commands = session.update(Message::select(Facet::Modules, [1, 2]));

    let units: Vec<_> = commands
        .fetches()
        .filter(|ticket| ticket.facet == Facet::Units)
        .collect();
    let locations: Vec<_> = commands
        .fetches()
        .filter(|ticket| ticket.facet == Facet::Locations)
        .collect();
    assert_eq!(units.len(), 1);
    assert_eq!(locations.len(), 1);
    assert_eq!(
        commands
            .fetches()
            .filter(|ticket| ticket.facet == Facet::Modules)
            .count(),
        0
    );
    assert_eq!(session.facet_state(Facet::Modules).status, FacetStatus::Idle);
    assert_eq!(
        units[0].descriptor.query_pairs(),
        vec![("moduleIds", "1,2".to_string())]
    );
}

#[test]
fn descriptor_scenario_for_single_unit_selection() {
    let selections = Selections::new().with(Facet::Units, [5]);
    let expected = QueryDescriptor::empty().with(Facet::Units, &[5].into());

    assert_eq!(compose(Facet::Modules, &selections), expected);
    assert_eq!(compose(Facet::Locations, &selections), expected);
    assert_eq!(compose(Facet::Units, &selections), QueryDescriptor::empty());
}

#[test]
fn stale_response_never_overwrites_newer_one() {
    let mut session = mounted_session();
    let first = session.update(Message::select(Facet::Modules, [1]));
    let second = session.update(Message::select(Facet::Modules, [2]));

    let old = first
        .fetches()
        .find(|ticket| ticket.facet == Facet::Units)
        .cloned()
        .expect("first units request");
    let new = second
        .fetches()
        .find(|ticket| ticket.facet == Facet::Units)
        .cloned()
        .expect("second units request");
    assert!(new.seq > old.seq);

    // Newer resolves first, older straggles in afterwards.
    session.update(Message::FacetLoaded {
        facet: Facet::Units,
        seq: new.seq,
        result: Ok(options(&[20])),
    });
    session.update(Message::FacetLoaded {
        facet: Facet::Units,
        seq: old.seq,
        result: Ok(options(&[10])),
    });

    let state = session.facet_state(Facet::Units);
    assert_eq!(state.options, options(&[20]));
    assert_eq!(state.last_query, Some(new.descriptor));
    assert_eq!(session.stale_discarded(), 1);
}

#[test]
fn returning_to_an_earlier_selection_applies_only_the_latest_request() {
    let mut session = mounted_session();
    let units_ticket = |commands: &Commands| {
        commands
            .fetches()
            .find(|ticket| ticket.facet == Facet::Units)
            .cloned()
            .expect("units request")
    };

    // A, then B, then A again before anything has come back.
    let a = units_ticket(&session.update(Message::select(Facet::Modules, [1])));
    let b = units_ticket(&session.update(Message::select(Facet::Modules, [1, 2])));
    let again = units_ticket(&session.update(Message::select(Facet::Modules, [1])));

    assert_eq!(again.descriptor, a.descriptor);
    assert_ne!(again.descriptor, b.descriptor);
    assert!(a.seq < b.seq && b.seq < again.seq);

    // The latest resolves first; the earlier request for the same
    // descriptor and the one for B both straggle in afterwards.
    for (seq, ids) in [(again.seq, [30]), (a.seq, [10]), (b.seq, [20])] {
        session.update(Message::FacetLoaded {
            facet: Facet::Units,
            seq,
            result: Ok(options(&ids)),
        });
    }

    let state = session.facet_state(Facet::Units);
    assert_eq!(state.options, options(&[30]));
    assert_eq!(state.status, FacetStatus::Idle);
    assert_eq!(state.last_query, Some(again.descriptor));
    assert_eq!(session.stale_discarded(), 2);
}

#[test]
fn older_response_arriving_first_is_also_discarded() {
    let mut session = mounted_session();
    let first = session.update(Message::select(Facet::Locations, [1]));
    let second = session.update(Message::select(Facet::Locations, [1, 3]));
    let seq_of = |commands: &Commands| {
        commands
            .fetches()
            .find(|ticket| ticket.facet == Facet::Modules)
            .map(|ticket| ticket.seq)
            .expect("modules request")
    };

    session.update(Message::FacetLoaded {
        facet: Facet::Modules,
        seq: seq_of(&first),
        result: Ok(options(&[10])),
    });
    assert_eq!(session.facet_state(Facet::Modules).status, FacetStatus::Loading);

    session.update(Message::FacetLoaded {
        facet: Facet::Modules,
        seq: seq_of(&second),
        result: Ok(options(&[30])),
    });
    assert_eq!(session.facet_state(Facet::Modules).options, options(&[30]));
}

#[test]
fn valid_outcome_disappears_after_edit_made_while_pending() {
    let mut session = mounted_session();
    session.update(Message::select(Facet::Modules, [1]));
    let id = apply(&mut session);
    assert_eq!(session.view().result, ResultRegion::Loading);

    session.update(Message::select(Facet::Units, [2]));
    assert_eq!(session.view().result, ResultRegion::Hidden);

    session.update(Message::Validated {
        id,
        result: Ok(ValidationOutcome::Valid),
    });
    assert_eq!(session.view().result, ResultRegion::Hidden);
    assert_eq!(session.gate_status(), GateStatus::Idle);
}

#[test]
fn valid_outcome_disappears_after_edit_made_after_resolution() {
    let mut session = mounted_session();
    session.update(Message::select(Facet::Modules, [1]));
    let id = apply(&mut session);
    session.update(Message::Validated {
        id,
        result: Ok(ValidationOutcome::Valid),
    });
    assert!(matches!(session.view().result, ResultRegion::Valid { .. }));

    session.update(Message::select(Facet::Modules, [1, 3]));
    assert_eq!(session.view().result, ResultRegion::Hidden);

    // Going back to the validated membership does not resurrect it.
    session.update(Message::select(Facet::Modules, [1]));
    assert_eq!(session.view().result, ResultRegion::Hidden);
}

#[test]
fn reset_clears_selections_and_outcome() {
    let mut session = mounted_session();
    session.update(Message::select(Facet::Modules, [1]));
    session.update(Message::select(Facet::Locations, [3]));
    let id = apply(&mut session);
    session.update(Message::Validated {
        id,
        result: Ok(ValidationOutcome::Valid),
    });

    session.update(Message::Reset);

    let view = session.view();
    assert!(session.selections().is_empty());
    assert_eq!(view.result, ResultRegion::Hidden);
    for facet in Facet::ALL {
        assert!(view.facet(facet).options.iter().all(|option| !option.selected));
        assert!(view.facet(facet).missing.is_empty());
    }
    assert!(session.gate().snapshot().is_none());
}

#[test]
fn backend_rejection_is_shown_verbatim() {
    let mut session = mounted_session();
    session.update(Message::select(Facet::Modules, [1]));
    session.update(Message::select(Facet::Locations, [2]));

    let commands = session.update(Message::Apply);
    let ticket = commands.validation().cloned().expect("validate command");
    assert_eq!(
        ticket.snapshot,
        Selections::new()
            .with(Facet::Modules, [1])
            .with(Facet::Units, SelectionSet::new())
            .with(Facet::Locations, [2])
    );

    session.update(Message::Validated {
        id: ticket.id,
        result: Err(FilterError::Rejected(vec!["unit required".to_string()])),
    });

    let result = session.view().result;
    assert_eq!(
        result,
        ResultRegion::Invalid {
            message: "unit required".to_string()
        }
    );
    insta::assert_snapshot!(result.to_string(), @"Invalid: unit required");
}

#[test]
fn transport_failure_on_validation_shows_generic_error() {
    let mut session = mounted_session();
    session.update(Message::select(Facet::Units, [1]));
    let id = apply(&mut session);
    session.update(Message::Validated {
        id,
        result: Err(FilterError::Transport("connection refused".into())),
    });

    let result = session.view().result;
    assert!(matches!(result, ResultRegion::Error(_)));
    insta::assert_snapshot!(result.to_string(), @"Error: Failed to fetch data. Please try again.");
}

#[test]
fn facet_error_does_not_block_other_facets() {
    let mut session = mounted_session();
    let commands = session.update(Message::select(Facet::Units, [1]));
    for ticket in commands.fetches() {
        let result = match ticket.facet {
            Facet::Modules => Err(FilterError::Status {
                status: 502,
                message: "bad gateway".into(),
            }),
            _ => Ok(options(&[7])),
        };
        session.update(Message::FacetLoaded {
            facet: ticket.facet,
            seq: ticket.seq,
            result,
        });
    }

    let view = session.view();
    assert_eq!(view.facet(Facet::Modules).status, FacetStatus::Error);
    assert!(view.facet(Facet::Modules).options.is_empty());
    assert_eq!(view.facet(Facet::Locations).status, FacetStatus::Idle);
    assert_eq!(view.facet(Facet::Locations).options.len(), 1);

    // The same descriptor is deduplicated; retry forces the refetch.
    let retried = session.update(Message::Retry(Facet::Modules));
    let ticket = retried.fetches().next().cloned().expect("retry ticket");
    session.update(Message::FacetLoaded {
        facet: Facet::Modules,
        seq: ticket.seq,
        result: Ok(options(&[4])),
    });
    assert_eq!(session.facet_state(Facet::Modules).status, FacetStatus::Idle);
}

proptest! {
    #[test]
    fn compose_is_order_independent(ids in proptest::collection::vec(0i64..100, 0..10)) {
        let mut reversed = ids.clone();
        reversed.reverse();
        let forward: SelectionSet = ids.iter().copied().map(Into::into).collect();
        let backward: SelectionSet = reversed.iter().copied().map(Into::into).collect();

        let a = Selections::new().with(Facet::Units, forward.clone()).with(Facet::Locations, backward.clone());
        let b = Selections::new().with(Facet::Locations, forward).with(Facet::Units, backward);

        for facet in Facet::ALL {
            prop_assert_eq!(compose(facet, &a), compose(facet, &b));
        }
    }
}
