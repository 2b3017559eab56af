// File: crates/kline-core/src/levels.rs
// Summary: Trade-level annotations (entry, stop-loss, take-profits) overlaid on charts.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelKind {
    Entry,
    StopLoss,
    TakeProfit1,
    TakeProfit2,
    TakeProfit3,
}

impl LevelKind {
    pub const ALL: [LevelKind; 5] = [
        LevelKind::Entry,
        LevelKind::StopLoss,
        LevelKind::TakeProfit1,
        LevelKind::TakeProfit2,
        LevelKind::TakeProfit3,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            LevelKind::Entry => "ENTRY",
            LevelKind::StopLoss => "SL",
            LevelKind::TakeProfit1 => "TP1",
            LevelKind::TakeProfit2 => "TP2",
            LevelKind::TakeProfit3 => "TP3",
        }
    }

    pub const fn is_take_profit(&self) -> bool {
        matches!(self, LevelKind::TakeProfit1 | LevelKind::TakeProfit2 | LevelKind::TakeProfit3)
    }
}

/// Optional price levels. A level is active only when present, finite and positive;
/// `Some(0.0)` is treated the same as `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TradeLevels {
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit1: Option<f64>,
    pub take_profit2: Option<f64>,
    pub take_profit3: Option<f64>,
}

impl TradeLevels {
    pub fn new(entry: f64, stop_loss: f64) -> Self {
        Self { entry: Some(entry), stop_loss: Some(stop_loss), ..Self::default() }
    }

    pub fn with_take_profits(mut self, tp1: f64, tp2: f64, tp3: f64) -> Self {
        self.take_profit1 = Some(tp1);
        self.take_profit2 = Some(tp2);
        self.take_profit3 = Some(tp3);
        self
    }

    /// Build from up to five prices in `entry, sl, tp1, tp2, tp3` order; zero means absent.
    pub fn from_prices(prices: &[f64]) -> Self {
        let at = |i: usize| prices.get(i).copied();
        Self {
            entry: at(0),
            stop_loss: at(1),
            take_profit1: at(2),
            take_profit2: at(3),
            take_profit3: at(4),
        }
    }

    fn raw(&self, kind: LevelKind) -> Option<f64> {
        match kind {
            LevelKind::Entry => self.entry,
            LevelKind::StopLoss => self.stop_loss,
            LevelKind::TakeProfit1 => self.take_profit1,
            LevelKind::TakeProfit2 => self.take_profit2,
            LevelKind::TakeProfit3 => self.take_profit3,
        }
    }

    pub fn get(&self, kind: LevelKind) -> Option<f64> {
        self.raw(kind).filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Active levels in `LevelKind::ALL` order.
    pub fn active(&self) -> impl Iterator<Item = (LevelKind, f64)> + '_ {
        LevelKind::ALL.into_iter().filter_map(move |k| self.get(k).map(|p| (k, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}
