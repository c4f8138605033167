//! Script replay integration tests
//!
//! Runs whole scripts through the runner and checks the reported outcomes
//! and the exchange state they leave behind.

use rust_decimal_macros::dec;
use sweepstake_clock::FixedClock;
use sweepstake_core::{ParticipantId, Side};
use sweepstake_exchange::{Exchange, ExchangeConfig};
use sweepstake_runner::{ScriptCommand, ScriptOutcome, execute, replay, replay_collect};

fn exchange() -> Exchange<FixedClock> {
    Exchange::with_clock(ExchangeConfig::default(), FixedClock::default()).unwrap()
}

const TRADING_DAY: &str = r#"
# alice is drawn FRA, bob wants it
{"op": "set_owner", "code": "FRA", "participant": "alice"}
{"op": "submit", "side": "bid", "code": "FRA", "participant": "bob", "price": "10.00"}
{"op": "submit", "side": "ask", "code": "FRA", "participant": "alice", "price": "9.50"}
{"op": "submit", "side": "bid", "code": "FRA", "participant": "bob", "price": "11"}
{"op": "submit", "side": "bid", "code": "XYZ", "participant": "bob", "price": "1"}
{"op": "show_owners"}
"#;

#[test]
fn test_trading_day_script() {
    let exchange = exchange();
    let (summary, outcomes) = replay_collect(&exchange, TRADING_DAY.as_bytes()).unwrap();

    assert_eq!(summary.commands, 6);
    assert_eq!(summary.trades, 1);
    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.invalid, 0);

    assert_eq!(outcomes[0], ScriptOutcome::OwnerSet { changed: true });
    assert!(matches!(outcomes[1], ScriptOutcome::Accepted { amended: false, .. }));

    match &outcomes[2] {
        ScriptOutcome::Traded { trade } => {
            assert_eq!(trade.price.inner(), dec!(9.50));
            assert_eq!(trade.buyer.as_str(), "bob");
        }
        other => panic!("expected a trade, got {other:?}"),
    }

    // bob now owns FRA
    match &outcomes[3] {
        ScriptOutcome::Rejected { kind, .. } => assert_eq!(kind, "state"),
        other => panic!("expected rejection, got {other:?}"),
    }
    match &outcomes[4] {
        ScriptOutcome::Rejected { kind, reason } => {
            assert_eq!(kind, "validation");
            assert!(reason.contains("XYZ"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    match &outcomes[5] {
        ScriptOutcome::Owners { owners } => {
            let fra = owners.iter().find(|(code, _)| code.as_str() == "FRA").unwrap();
            assert_eq!(fra.1.as_ref().map(ParticipantId::as_str), Some("bob"));
        }
        other => panic!("expected owners, got {other:?}"),
    }
}

#[test]
fn test_invalid_lines_are_reported_not_fatal() {
    let script = r#"
{"op": "set_owner", "code": "NZL", "participant": "tommy"}
this is not json
{"op": "submit", "side": "bid", "code": "NZL", "participant": "bob", "price": "abc"}
{"op": "submit", "side": "bid", "code": "NZL", "participant": "bob", "price": "2"}
"#;
    let exchange = exchange();
    let (summary, outcomes) = replay_collect(&exchange, script.as_bytes()).unwrap();

    assert_eq!(summary.commands, 4);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.rejected, 1);
    assert!(matches!(outcomes[1], ScriptOutcome::Invalid { line: 3, .. }));
    assert!(outcomes[1].is_failure());
    assert_eq!(exchange.best_bid("NZL").unwrap().unwrap().price.inner(), dec!(2));
}

#[test]
fn test_replay_writes_json_lines() {
    let script = r#"{"op": "set_owner", "code": "WAL", "participant": "joooe"}
{"op": "submit", "side": "ask", "code": "WAL", "participant": "joooe", "price": "5"}
{"op": "show_book", "code": "WAL", "side": "ask"}
{"op": "drop", "code": "WAL"}
{"op": "show_instruments"}"#;

    let exchange = exchange();
    let mut output = Vec::new();
    let summary = replay(&exchange, script.as_bytes(), &mut output).unwrap();
    assert_eq!(summary.commands, 5);

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1]["outcome"], "accepted");
    assert_eq!(lines[2]["orders"][0]["participant"], "joooe");
    assert_eq!(lines[3]["outcome"], "dropped");
    assert_eq!(lines[3]["previous_owner"], "joooe");

    let wal = lines[4]["instruments"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["code"] == "WAL")
        .unwrap();
    assert_eq!(wal["lifecycle"], "DROPPED");
}

#[test]
fn test_execute_cancel() {
    let exchange = exchange();
    exchange.set_owner("ARG", "damtur").unwrap();
    exchange
        .submit_order(Side::Bid, "ARG", "stu", dec!(4))
        .unwrap();

    let cancel = ScriptCommand::Cancel {
        side: Side::Bid,
        code: "ARG".to_string(),
        participant: "stu".to_string(),
    };
    assert_eq!(
        execute(&exchange, cancel.clone()),
        ScriptOutcome::Canceled { removed: true }
    );
    assert_eq!(
        execute(&exchange, cancel),
        ScriptOutcome::Canceled { removed: false }
    );
}
