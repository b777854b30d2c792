use crate::errors::{Error, Result};
use crate::fx::fx_errors::FxError;
use crate::fx::fx_model::ExchangeRateSeries;
use crate::money::decimal_context as ctx;
use crate::money::{Currency, MoneyAmount};
use crate::series::{IndexSeries, MoneyAmountSeries, YearMonth};
use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// A calculator for currency conversions using a Graph-based approach.
/// It stores rates as independent monthly series per pair and calculates paths on demand.
/// Lookups are exact by month: there is no nearest-month fallback and no extrapolation.
pub struct CurrencyConverter {
    /// Graph adjacency list: Currency -> Set of connected currencies.
    /// Ordered sets keep the search, and therefore the chosen path, deterministic.
    adj: BTreeMap<Currency, BTreeSet<Currency>>,

    /// The actual rate data.
    /// Key: (From_Currency, To_Currency)
    /// Value: monthly rates, or a constant factor.
    rates: HashMap<(Currency, Currency), IndexSeries>,
}

impl CurrencyConverter {
    /// Creates a new `CurrencyConverter` from a Vec of ExchangeRateSeries.
    pub fn new(series: Vec<ExchangeRateSeries>) -> std::result::Result<Self, FxError> {
        let mut converter = CurrencyConverter {
            adj: BTreeMap::new(),
            rates: HashMap::new(),
        };
        for pair in series {
            converter.add_rate_series(pair)?;
        }
        Ok(converter)
    }

    /// Adds one pair and its inverse.
    /// A zero rate is stored in both directions but never used.
    pub fn add_rate_series(&mut self, pair: ExchangeRateSeries) -> std::result::Result<(), FxError> {
        if pair.from == pair.to {
            return Err(FxError::InvalidCurrencyPair(pair.pair_name()));
        }
        let inverse_name = format!("{}/{}", pair.to, pair.from);

        if let Some(rate) = pair.rates.factors().find(|rate| *rate < Decimal::ZERO) {
            return Err(FxError::InvalidRate(format!(
                "negative rate {} for {}",
                rate,
                pair.pair_name()
            )));
        }

        // 1. Inverse rates (zero maps to zero)
        let inverse = pair
            .rates
            .map(inverse_name, |rate| ctx::div(Decimal::ONE, rate).unwrap_or(Decimal::ZERO));

        // 2. Store Forward Rate
        self.adj.entry(pair.from).or_default().insert(pair.to);
        self.rates.insert((pair.from, pair.to), pair.rates);

        // 3. Store Inverse Rate
        self.adj.entry(pair.to).or_default().insert(pair.from);
        self.rates.insert((pair.to, pair.from), inverse);
        Ok(())
    }

    /// The rate of a directly connected pair for exactly `month`.
    fn get_direct_rate(&self, from: Currency, to: Currency, month: YearMonth) -> Option<Decimal> {
        self.rates
            .get(&(from, to))
            .and_then(|series| series.get_index(month).ok())
            .filter(|rate| !rate.is_zero())
    }

    /// Units of `to` per unit of `from` in `month`.
    ///
    /// Uses Breadth-First Search (BFS) to find the shortest chain of pairs that all have
    /// a rate for the month; hop rates are multiplied under the decimal context.
    pub fn rate(&self, from: Currency, to: Currency, month: YearMonth) -> Result<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        // BFS State: (Current Currency, Accumulated Rate, Hops)
        let mut queue: VecDeque<(Currency, Decimal, usize)> = VecDeque::new();
        let mut visited: BTreeSet<Currency> = BTreeSet::new();

        queue.push_back((from, Decimal::ONE, 0));
        visited.insert(from);

        while let Some((current, accumulated, hops)) = queue.pop_front() {
            if current == to {
                if hops > 1 {
                    debug!("{}/{} for {} composed over {} pairs", from, to, month, hops);
                }
                return Ok(accumulated);
            }

            if let Some(neighbors) = self.adj.get(&current) {
                for neighbor in neighbors {
                    if visited.contains(neighbor) {
                        continue;
                    }
                    if let Some(rate) = self.get_direct_rate(current, *neighbor, month) {
                        visited.insert(*neighbor);
                        queue.push_back((*neighbor, ctx::mul(accumulated, rate), hops + 1));
                    }
                }
            }
        }

        Err(Error::no_data(format!("{}/{}", from, to), month))
    }

    /// Converts `amount` to `target` at the rates of `month`.
    pub fn exchange(
        &self,
        amount: &MoneyAmount,
        target: Currency,
        month: YearMonth,
    ) -> Result<MoneyAmount> {
        if amount.currency() == target {
            return Ok(*amount);
        }
        let rate = self.rate(amount.currency(), target, month)?;
        Ok(amount.exchange(rate, target))
    }

    /// Converts every month of `series`; any month without a rate fails the whole series.
    pub fn exchange_series(
        &self,
        series: &MoneyAmountSeries,
        target: Currency,
    ) -> Result<MoneyAmountSeries> {
        if series.currency() == target {
            return Ok(series.clone());
        }
        let converted =
            series.map_to(target, |ym, amount| self.exchange(&amount, target, ym))?;
        Ok(converted.with_name(format!("{} ({})", series.name(), target)))
    }

    /// Structural shortest path, ignoring which months have data.
    fn path(&self, from: Currency, to: Currency) -> Option<Vec<Currency>> {
        let mut parents: BTreeMap<Currency, Currency> = BTreeMap::new();
        let mut queue = VecDeque::from([from]);
        let mut visited = BTreeSet::from([from]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![to];
                let mut node = to;
                while let Some(parent) = parents.get(&node) {
                    path.push(*parent);
                    node = *parent;
                }
                path.reverse();
                return Some(path);
            }
            for neighbor in self.adj.get(&current).into_iter().flatten() {
                if visited.insert(*neighbor) {
                    parents.insert(*neighbor, current);
                    queue.push_back(*neighbor);
                }
            }
        }
        None
    }

    /// The months a conversion is defined for: the latest start and the earliest
    /// end among the pairs on the path. `None` bounds mean unbounded (constant pairs).
    pub fn supported_range(
        &self,
        from: Currency,
        to: Currency,
    ) -> std::result::Result<(Option<YearMonth>, Option<YearMonth>), FxError> {
        let path = self
            .path(from, to)
            .ok_or(FxError::NoConversionPath(from, to))?;

        let mut start: Option<YearMonth> = None;
        let mut end: Option<YearMonth> = None;
        for hop in path.windows(2) {
            if let Some(series) = self.rates.get(&(hop[0], hop[1])) {
                if series.is_constant() {
                    continue;
                }
                start = match (start, series.from()) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
                end = match (end, series.to()) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
            }
        }
        Ok((start, end))
    }
}
