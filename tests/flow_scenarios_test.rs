//! End-to-end walks over the intake flows and the review life cycle.
//!
//! Transitions are pure, so these scenarios run exactly the way the
//! dispatcher drives them (store lookup, advance, apply) without a
//! Telegram connection. The `apply` helper mirrors the in-flow handler.

use pretty_assertions::assert_eq;

use cashdesk::core::validation::AmountLimits;
use cashdesk::flow::{self, field, FlowEvent, FlowKind, FlowLimits, InMemorySessions, Reply, SessionStore, Step};
use cashdesk::review::{self, Resolution, Verdict};

const LIMITS: FlowLimits = FlowLimits {
    deposit: AmountLimits { min: 100, max: 100_000 },
    withdraw: AmountLimits { min: 50, max: 45_000 },
};

fn text(s: &str) -> FlowEvent {
    FlowEvent::Text(s.to_string())
}

fn photo(file_id: &str) -> FlowEvent {
    FlowEvent::Photo { file_id: file_id.to_string() }
}

/// Feeds one event through the store the way the message handler does.
fn apply(store: &dyn SessionStore, user_id: i64, event: FlowEvent) -> Reply {
    let session = store.get(user_id).expect("session must be active");
    let transition = flow::advance(&session, &event, &LIMITS);

    if let Some((name, value)) = transition.record {
        store.update_field(user_id, name, value);
    }
    if let Some(step) = transition.next_step {
        store.set_step(user_id, step);
    }
    if matches!(transition.reply, Reply::Completed { .. }) {
        store.clear(user_id);
    }
    transition.reply
}

#[test]
fn deposit_scenario_collects_account_amount_and_receipt() {
    let store = InMemorySessions::new();
    let user = 1001;

    // /replenish
    store.start(user, FlowKind::Deposit);

    assert_eq!(apply(&store, user, text("ACC123")), Reply::AmountPrompt { limits: LIMITS.deposit });

    match apply(&store, user, text("500")) {
        Reply::PaymentRequisites { payment_url } => {
            assert!(payment_url.contains("550000"), "length-prefixed amount missing in {}", payment_url);
        }
        other => panic!("expected payment requisites, got {:?}", other),
    }
    assert_eq!(store.get(user).unwrap().step, Step::AwaitingReceipt);

    match apply(&store, user, photo("receipt-file-id")) {
        Reply::Completed { fields } => {
            assert_eq!(fields.get(field::ACCOUNT).map(String::as_str), Some("ACC123"));
            assert_eq!(fields.get(field::AMOUNT).map(String::as_str), Some("500"));
            assert_eq!(fields.get(field::RECEIPT).map(String::as_str), Some("receipt-file-id"));
        }
        other => panic!("expected completion, got {:?}", other),
    }

    // Completion clears the session: the next message is not in-flow anymore.
    assert_eq!(store.get(user), None);
}

#[test]
fn withdraw_scenario_rejects_bad_amount_and_stays_in_place() {
    let store = InMemorySessions::new();
    let user = 1002;

    store.start(user, FlowKind::Withdraw);
    apply(&store, user, text("ACC-9"));
    assert_eq!(store.get(user).unwrap().step, Step::AwaitingAmount);

    let reply = apply(&store, user, text("abc"));
    assert!(matches!(reply, Reply::AmountInvalid { .. }));
    assert_eq!(store.get(user).unwrap().step, Step::AwaitingAmount, "step must survive a bad amount");

    // A corrected amount moves on.
    assert_eq!(apply(&store, user, text("1500")), Reply::RequisitesPrompt);
    assert_eq!(store.get(user).unwrap().step, Step::AwaitingRequisites);
}

#[test]
fn withdraw_scenario_full_walk_reaches_review() {
    let store = InMemorySessions::new();
    let user = 1003;

    store.start(user, FlowKind::Withdraw);
    apply(&store, user, text("ACC-9"));
    apply(&store, user, text("1500"));
    assert_eq!(apply(&store, user, text("+996702388466 mbank")), Reply::WithdrawInstruction);

    match apply(&store, user, text("CODE-77")) {
        Reply::Completed { fields } => {
            assert_eq!(fields.get(field::ACCOUNT).map(String::as_str), Some("ACC-9"));
            assert_eq!(fields.get(field::AMOUNT).map(String::as_str), Some("1500"));
            assert_eq!(fields.get(field::REQUISITES).map(String::as_str), Some("+996702388466 mbank"));
            assert_eq!(fields.get(field::CODE).map(String::as_str), Some("CODE-77"));
        }
        other => panic!("expected completion, got {:?}", other),
    }
    assert_eq!(store.get(user), None);
}

#[test]
fn cancel_mid_flow_leaves_no_residual_fields() {
    let store = InMemorySessions::new();
    let user = 1004;

    store.start(user, FlowKind::Deposit);
    apply(&store, user, text("ACC123"));
    apply(&store, user, text("500"));

    // /cancel
    store.clear(user);
    assert_eq!(store.get(user), None);

    // A fresh flow starts from scratch.
    store.start(user, FlowKind::Deposit);
    let session = store.get(user).unwrap();
    assert_eq!(session.step, Step::AwaitingAccount);
    assert!(session.fields.is_empty());
}

#[test]
fn starting_a_new_flow_discards_the_old_one() {
    let store = InMemorySessions::new();
    let user = 1005;

    store.start(user, FlowKind::Deposit);
    apply(&store, user, text("ACC123"));

    store.start(user, FlowKind::Withdraw);
    let session = store.get(user).unwrap();
    assert_eq!(session.kind, FlowKind::Withdraw);
    assert_eq!(session.step, Step::AwaitingAccount);
    assert!(session.fields.is_empty());
}

#[test]
fn users_advance_independently() {
    let store = InMemorySessions::new();

    store.start(1, FlowKind::Deposit);
    store.start(2, FlowKind::Deposit);

    apply(&store, 1, text("ACC-A"));

    assert_eq!(store.get(1).unwrap().step, Step::AwaitingAmount);
    assert_eq!(store.get(2).unwrap().step, Step::AwaitingAccount);
    assert_eq!(store.get(2).unwrap().field(field::ACCOUNT), None);
}

#[test]
fn decline_then_approve_is_a_no_op() {
    // The admin message body is the only durable record; replay the handler's
    // marker logic over it.
    let mut body = "Новая заявка на пополнение\nСчёт: ACC123\nСумма: 500".to_string();

    // First decision: nothing recorded yet, decline goes through.
    assert_eq!(review::resolution_of(&body), None);
    body.push_str(&review::marker_line(Verdict::Decline));

    // Second decision on the same token: the guard fires before any side
    // effect, so the user never sees an approval after the decline.
    assert_eq!(review::resolution_of(&body), Some(Resolution::Declined));
}

#[test]
fn decision_tokens_round_trip_through_callback_data() {
    let deposit = review::Decision::new(Verdict::Approve, FlowKind::Deposit, 1001);
    let withdraw = review::Decision::new(Verdict::Decline, FlowKind::Withdraw, 1003);

    assert_eq!(review::parse_decision(&deposit.to_string()), Some(deposit));
    assert_eq!(review::parse_decision(&withdraw.to_string()), Some(withdraw));
    assert_eq!(review::parse_decision("emerge_deposit:1001"), None);
}
