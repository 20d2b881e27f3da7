use chrono::NaiveDate;

/// Default calendar anchor for synthetic paths
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Daily returns plus the equity curve they compound into.
///
/// Equity is only ever computed from the returns, so the two can't drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    start_date: NaiveDate,
    initial_capital: f64,
    returns: Vec<f64>,
    equity: Vec<f64>,
}

impl SimulatedPath {
    /// Build a path by compounding `returns` onto `initial_capital`
    pub fn from_returns(initial_capital: f64, start_date: NaiveDate, returns: Vec<f64>) -> Self {
        let mut equity = Vec::with_capacity(returns.len());
        let mut balance = initial_capital;
        for r in &returns {
            balance *= 1.0 + r;
            equity.push(balance);
        }

        Self {
            start_date,
            initial_capital,
            returns,
            equity,
        }
    }

    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    pub fn equity(&self) -> &[f64] {
        &self.equity
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Calendar date for day `i` (daily frequency, weekends included)
    pub fn date_at(&self, i: usize) -> Option<NaiveDate> {
        if i >= self.len() {
            return None;
        }
        self.start_date.iter_days().nth(i)
    }

    /// One date per day, aligned with `returns()` and `equity()`
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start_date.iter_days().take(self.len()).collect()
    }

    /// Last equity value, or the starting capital for an empty path
    pub fn final_equity(&self) -> f64 {
        self.equity.last().copied().unwrap_or(self.initial_capital)
    }
}
