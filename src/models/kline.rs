use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, IgnoredAny, SeqAccess, Visitor},
};
use std::fmt;

/// One kline (candlestick) as returned by `/api/v3/klines`.
///
/// Prices and volumes stay as the decimal strings Binance sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp (ms)
    pub open_time: i64,
    pub open_price: String,
    pub high_price: String,
    pub low_price: String,
    pub close_price: String,
    /// base asset volume
    pub volume: String,
    /// Unix timestamp (ms)
    pub close_time: i64,
    pub quote_asset_volume: String,
    pub number_of_trades: u64,
    pub taker_buy_base_asset_volume: String,
    pub taker_buy_quote_asset_volume: String,
    /// Binance marks this as unused; kept as received.
    pub unused_field: String,
}

/// Number of positional elements in a Binance kline row.
pub const KLINE_ROW_LEN: usize = 12;

/// Positional wire form of a [`Candle`]: a JSON array of exactly 12 elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlineRow(pub Candle);

impl From<KlineRow> for Candle {
    fn from(row: KlineRow) -> Self {
        row.0
    }
}

impl<'de> Deserialize<'de> for KlineRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KlineRowVisitor;

        impl<'de> Visitor<'de> for KlineRowVisitor {
            type Value = KlineRow;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "a Binance kline array with {KLINE_ROW_LEN} elements")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut index = 0;
                let open_time = element(&mut seq, &mut index, "open_time", &self)?;
                let open_price = element(&mut seq, &mut index, "open_price", &self)?;
                let high_price = element(&mut seq, &mut index, "high_price", &self)?;
                let low_price = element(&mut seq, &mut index, "low_price", &self)?;
                let close_price = element(&mut seq, &mut index, "close_price", &self)?;
                let volume = element(&mut seq, &mut index, "volume", &self)?;
                let close_time = element(&mut seq, &mut index, "close_time", &self)?;
                let quote_asset_volume =
                    element(&mut seq, &mut index, "quote_asset_volume", &self)?;
                let number_of_trades = element(&mut seq, &mut index, "number_of_trades", &self)?;
                let taker_buy_base_asset_volume =
                    element(&mut seq, &mut index, "taker_buy_base_asset_volume", &self)?;
                let taker_buy_quote_asset_volume =
                    element(&mut seq, &mut index, "taker_buy_quote_asset_volume", &self)?;
                let unused_field = element(&mut seq, &mut index, "unused_field", &self)?;

                // extra trailing elements mean the row layout changed
                if seq.next_element::<IgnoredAny>()?.is_some() {
                    let mut len = KLINE_ROW_LEN + 1;
                    while seq.next_element::<IgnoredAny>()?.is_some() {
                        len += 1;
                    }
                    return Err(de::Error::invalid_length(len, &self));
                }

                Ok(KlineRow(Candle {
                    open_time,
                    open_price,
                    high_price,
                    low_price,
                    close_price,
                    volume,
                    close_time,
                    quote_asset_volume,
                    number_of_trades,
                    taker_buy_base_asset_volume,
                    taker_buy_quote_asset_volume,
                    unused_field,
                }))
            }
        }

        deserializer.deserialize_seq(KlineRowVisitor)
    }
}

/// Reads the next positional element, naming the field in the error.
fn element<'de, A, T>(
    seq: &mut A,
    index: &mut usize,
    name: &'static str,
    expected: &dyn de::Expected,
) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    let value = seq
        .next_element::<T>()
        .map_err(|err| de::Error::custom(format_args!("{name} (index {index}): {err}")))?
        .ok_or_else(|| de::Error::invalid_length(*index, expected))?;
    *index += 1;
    Ok(value)
}
