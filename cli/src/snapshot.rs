//! Protocol state frozen at one point: reserves, prices and user positions
//!
//! A snapshot is the file-backed stand-in for the live oracle and data
//! provider. Amounts are decimal strings (or small integers) so that full
//! 256-bit values survive TOML and JSON.

use liquidation_model::{AssetPosition, U256};
use serde::Deserialize;

use crate::error::EstimateError;
use crate::provider::{PriceOracle, ReserveDataProvider, ReserveSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Toml,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    /// Block (or slot) the state was read at
    #[serde(default)]
    pub block: Option<u64>,

    #[serde(default)]
    pub reserves: Vec<ReserveEntry>,

    #[serde(default)]
    pub positions: Vec<PositionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReserveEntry {
    pub symbol: String,
    pub decimals: u8,
    pub liquidation_bonus: u16,
    #[serde(default)]
    pub liquidation_threshold: u16,
    #[serde(default = "enabled")]
    pub usage_as_collateral_enabled: bool,
    /// Missing when the oracle had no answer
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub price: Option<U256>,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub available_liquidity: U256,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionEntry {
    pub user: String,
    pub asset: String,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub collateral_balance: U256,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub stable_debt: U256,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub variable_debt: U256,
}

fn enabled() -> bool {
    true
}

impl Snapshot {
    /// Parse a snapshot document; `Err` carries a human-readable reason
    pub fn parse(text: &str, format: SnapshotFormat) -> Result<Self, String> {
        let snapshot: Snapshot = match format {
            SnapshotFormat::Toml => toml::from_str(text).map_err(|e| e.to_string())?,
            SnapshotFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string())?,
        };
        snapshot.check_unique()?;
        Ok(snapshot)
    }

    fn check_unique(&self) -> Result<(), String> {
        for (i, reserve) in self.reserves.iter().enumerate() {
            if self.reserves[..i]
                .iter()
                .any(|other| other.symbol.eq_ignore_ascii_case(&reserve.symbol))
            {
                return Err(format!("duplicate reserve {}", reserve.symbol));
            }
        }
        for (i, position) in self.positions.iter().enumerate() {
            if self.positions[..i].iter().any(|other| {
                other.user.eq_ignore_ascii_case(&position.user)
                    && other.asset.eq_ignore_ascii_case(&position.asset)
            }) {
                return Err(format!(
                    "duplicate position {} / {}",
                    position.user, position.asset
                ));
            }
        }
        Ok(())
    }

    pub fn find_reserve(&self, asset: &str) -> Option<&ReserveEntry> {
        self.reserves
            .iter()
            .find(|reserve| reserve.symbol.eq_ignore_ascii_case(asset))
    }

    /// All positions held by `user`, in file order
    pub fn positions_of<'a>(&'a self, user: &'a str) -> impl Iterator<Item = &'a PositionEntry> + 'a {
        self.positions
            .iter()
            .filter(move |position| position.user.eq_ignore_ascii_case(user))
    }
}

impl PriceOracle for Snapshot {
    fn asset_price(&self, asset: &str) -> Result<U256, EstimateError> {
        let reserve = self
            .find_reserve(asset)
            .ok_or_else(|| EstimateError::UnknownReserve(asset.to_string()))?;
        reserve
            .price
            .ok_or_else(|| EstimateError::PriceUnavailable(reserve.symbol.clone()))
    }
}

impl ReserveDataProvider for Snapshot {
    fn reserve(&self, asset: &str) -> Result<ReserveSnapshot, EstimateError> {
        let reserve = self
            .find_reserve(asset)
            .ok_or_else(|| EstimateError::UnknownReserve(asset.to_string()))?;
        Ok(ReserveSnapshot {
            decimals: reserve.decimals,
            liquidation_bonus: reserve.liquidation_bonus,
            liquidation_threshold: reserve.liquidation_threshold,
            usage_as_collateral_enabled: reserve.usage_as_collateral_enabled,
            available_liquidity: reserve.available_liquidity,
        })
    }

    fn user_reserve(&self, asset: &str, user: &str) -> Result<AssetPosition, EstimateError> {
        if self.find_reserve(asset).is_none() {
            return Err(EstimateError::UnknownReserve(asset.to_string()));
        }
        let position = self
            .positions_of(user)
            .find(|position| position.asset.eq_ignore_ascii_case(asset))
            .map(|position| AssetPosition {
                collateral_balance: position.collateral_balance,
                stable_debt: position.stable_debt,
                variable_debt: position.variable_debt,
            })
            .unwrap_or_default();
        Ok(position)
    }
}

/// Serde helpers for 256-bit amounts written as decimal text
pub mod amount {
    use liquidation_model::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Text(String),
    }

    fn parse<E: de::Error>(raw: Raw) -> Result<U256, E> {
        match raw {
            Raw::Int(value) => Ok(U256::from(value)),
            Raw::Text(text) => {
                let digits = text.trim().replace('_', "");
                if digits.is_empty() {
                    return Err(E::custom(format!("invalid amount '{}'", text)));
                }
                U256::from_dec_str(&digits)
                    .map_err(|_| E::custom(format!("invalid amount '{}'", text)))
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        parse(Raw::deserialize(deserializer)?)
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        Option::<Raw>::deserialize(deserializer)?.map(parse).transpose()
    }

    /// Write any `Display` value (amounts, outcome flags) as a string
    pub fn serialize_display<T: Display, S: Serializer>(
        value: &T,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
block = 17000000

[[reserves]]
symbol = "WETH"
decimals = 18
liquidation_bonus = 10500
liquidation_threshold = 8250
price = "1000000000000000000"
available_liquidity = "50_000_000_000_000_000_000"

[[reserves]]
symbol = "USDC"
decimals = 6
liquidation_bonus = 10450
liquidation_threshold = 8800
price = "500000000000000"
available_liquidity = 1000000000000

[[positions]]
user = "0xBorrower"
asset = "WETH"
collateral_balance = "2000000000000000000"

[[positions]]
user = "0xBorrower"
asset = "USDC"
variable_debt = 3000000000
"#;

    #[test]
    fn test_parse_toml() {
        let snapshot = Snapshot::parse(SAMPLE, SnapshotFormat::Toml).unwrap();
        assert_eq!(snapshot.block, Some(17_000_000));
        assert_eq!(snapshot.reserves.len(), 2);

        let weth = snapshot.find_reserve("weth").unwrap();
        assert_eq!(weth.price, Some(U256::from(1_000_000_000_000_000_000u128)));
        assert_eq!(
            weth.available_liquidity,
            U256::from(50_000_000_000_000_000_000u128)
        );
        assert!(weth.usage_as_collateral_enabled);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "reserves": [
                { "symbol": "DAI", "decimals": 18, "liquidation_bonus": 10500,
                  "liquidation_threshold": 8000, "price": "1" }
            ],
            "positions": [
                { "user": "alice", "asset": "DAI", "stable_debt": "115792089237316195423570985008687907853269984665640564039457584007913129639935" }
            ]
        }"#;
        let snapshot = Snapshot::parse(json, SnapshotFormat::Json).unwrap();
        let position = snapshot.user_reserve("DAI", "ALICE").unwrap();
        assert_eq!(position.stable_debt, U256::MAX);
        assert_eq!(snapshot.reserve("dai").unwrap().available_liquidity, U256::zero());
    }

    #[test]
    fn test_rejects_bad_amount() {
        let text = r#"
[[reserves]]
symbol = "WETH"
decimals = 18
liquidation_bonus = 10500
price = "1.5"
"#;
        let err = Snapshot::parse(text, SnapshotFormat::Toml).unwrap_err();
        assert!(err.contains("invalid amount"), "{}", err);
    }

    #[test]
    fn test_rejects_blank_amount() {
        for blank in ["", "   ", "_"] {
            let text = format!(
                r#"
[[positions]]
user = "0xabc"
asset = "WETH"
collateral_balance = "{}"
"#,
                blank
            );
            let err = Snapshot::parse(&text, SnapshotFormat::Toml).unwrap_err();
            assert!(err.contains("invalid amount"), "{:?}: {}", blank, err);
        }

        let err = Snapshot::parse(
            r#"{ "reserves": [{ "symbol": "WETH", "decimals": 18, "liquidation_bonus": 10500, "price": "" }] }"#,
            SnapshotFormat::Json,
        )
        .unwrap_err();
        assert!(err.contains("invalid amount"), "{}", err);
    }

    #[test]
    fn test_rejects_duplicate_reserve() {
        let text = r#"
[[reserves]]
symbol = "WETH"
decimals = 18
liquidation_bonus = 10500

[[reserves]]
symbol = "weth"
decimals = 18
liquidation_bonus = 10500
"#;
        let err = Snapshot::parse(text, SnapshotFormat::Toml).unwrap_err();
        assert!(err.contains("duplicate reserve"));
    }

    #[test]
    fn test_provider_lookups() {
        let snapshot = Snapshot::parse(SAMPLE, SnapshotFormat::Toml).unwrap();

        assert_eq!(
            snapshot.asset_price("USDC").unwrap(),
            U256::from(500_000_000_000_000u64)
        );
        assert!(matches!(
            snapshot.asset_price("WBTC"),
            Err(EstimateError::UnknownReserve(_))
        ));

        let debt = snapshot.user_reserve("USDC", "0xborrower").unwrap();
        assert_eq!(debt.variable_debt, U256::from(3_000_000_000u64));

        // Known reserve, unknown user -> empty position
        let nobody = snapshot.user_reserve("WETH", "0xnobody").unwrap();
        assert_eq!(nobody, AssetPosition::default());
    }

    #[test]
    fn test_missing_price() {
        let text = r#"
[[reserves]]
symbol = "WETH"
decimals = 18
liquidation_bonus = 10500
"#;
        let snapshot = Snapshot::parse(text, SnapshotFormat::Toml).unwrap();
        assert!(matches!(
            snapshot.asset_price("WETH"),
            Err(EstimateError::PriceUnavailable(_))
        ));
    }
}
