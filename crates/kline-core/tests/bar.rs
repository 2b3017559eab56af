// File: crates/kline-core/tests/bar.rs
// Purpose: Bar invariants, sequence ordering, interval and trading-mode labels.

mod common;

use chrono::Duration;
use common::{rising, t0};
use kline_core::{validate_sequence, Bar, BarError, Interval, TradingMode};

#[test]
fn try_new_enforces_ohlc_bracket() {
    let (o, c) = (t0(), t0() + Duration::hours(1));
    assert!(Bar::try_new(o, c, 10.0, 12.0, 9.0, 11.0, 1.0).is_ok());
    assert!(matches!(Bar::try_new(o, c, 10.0, 10.5, 9.0, 11.0, 1.0), Err(BarError::PriceOrder { .. })));
    assert!(matches!(Bar::try_new(o, c, 10.0, 12.0, 10.5, 11.0, 1.0), Err(BarError::PriceOrder { .. })));
    assert_eq!(Bar::try_new(c, o, 10.0, 12.0, 9.0, 11.0, 1.0), Err(BarError::TimeOrder));
    assert_eq!(Bar::try_new(o, c, f64::NAN, 12.0, 9.0, 11.0, 1.0), Err(BarError::NonFinite));
}

#[test]
fn sequence_must_strictly_increase() {
    let mut bars = rising(5);
    assert_eq!(validate_sequence(&bars), Ok(()));
    assert_eq!(validate_sequence(&[]), Ok(()));

    bars[3].open_time = bars[2].open_time;
    assert_eq!(validate_sequence(&bars), Err(BarError::NotIncreasing { index: 3 }));
}

#[test]
fn gaps_are_allowed() {
    let mut bars = rising(3);
    bars[2].open_time += Duration::days(3);
    bars[2].close_time += Duration::days(3);
    assert_eq!(validate_sequence(&bars), Ok(()));
}

#[test]
fn interval_labels_round_trip() {
    for interval in Interval::ALL {
        assert_eq!(interval.as_str().parse::<Interval>(), Ok(interval));
    }
    assert_eq!(Interval::H4.display_name(), "4 Hours");
    assert_eq!(Interval::W1.duration(), Duration::days(7));
    assert_eq!(Interval::M15.to_string(), "15m");
    assert!("2h".parse::<Interval>().is_err());
}

#[test]
fn trading_modes_pick_timeframes() {
    assert_eq!(TradingMode::Scalping.timeframes().len(), 5);
    assert!(!TradingMode::Scalping.timeframes().contains(&Interval::W1));
    assert_eq!(TradingMode::Swing.timeframes().last(), Some(&Interval::W1));
    assert_eq!("Intraday".parse::<TradingMode>(), Ok(TradingMode::Intraday));
    assert!("hodl".parse::<TradingMode>().is_err());
}
