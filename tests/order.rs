#![allow(
    clippy::unwrap_used,
    reason = "Do not need additional syntax for setting up tests"
)]

mod common;

use std::str::FromStr as _;

use alloy::signers::local::PrivateKeySigner;
use chrono::{TimeZone as _, Utc};
use predict_client_sdk::builder::OrderBuilder;
use predict_client_sdk::error::Kind;
use predict_client_sdk::order::{BuildOrderInput, MAX_SALT, OrderKind, Side, SignatureType};
use predict_client_sdk::types::{Address, U256, address};
use predict_client_sdk::{BNB_MAINNET, BNB_TESTNET, contract_config};
use serde_json::to_value;

use crate::common::{PRIVATE_KEY, builder};

fn limit_input() -> BuildOrderInput {
    BuildOrderInput::builder()
        .side(Side::Buy)
        .token_id(U256::from(12_345_u64))
        .maker_amount(U256::from(1_000_000_000_000_000_000_u64))
        .taker_amount(U256::from(2_000_000_000_000_000_000_u64))
        .fee_rate_bps(100)
        .build()
}

mod build {
    use super::*;

    #[test]
    fn limit_order_should_succeed() -> anyhow::Result<()> {
        let order = builder().build_order(OrderKind::Limit, limit_input())?;

        assert_eq!(order.side, Side::Buy as u8);
        assert_eq!(order.tokenId, U256::from(12_345_u64));
        assert_eq!(order.makerAmount, U256::from(1_000_000_000_000_000_000_u64));
        assert_eq!(order.takerAmount, U256::from(2_000_000_000_000_000_000_u64));
        assert_eq!(order.feeRateBps, U256::from(100_u64));
        assert_eq!(order.signatureType, SignatureType::Eoa as u8);
        assert_eq!(order.expiration, U256::ZERO);
        assert_eq!(order.nonce, U256::ZERO);
        assert_eq!(order.taker, Address::ZERO);

        Ok(())
    }

    #[test]
    fn market_order_should_succeed() -> anyhow::Result<()> {
        let order = builder().build_order(
            OrderKind::Market,
            BuildOrderInput::builder()
                .side(Side::Sell)
                .token_id(U256::from(67_890_u64))
                .maker_amount(U256::from(500_000_000_000_000_000_u64))
                .taker_amount(U256::from(250_000_000_000_000_000_u64))
                .fee_rate_bps(50)
                .build(),
        )?;

        assert_eq!(order.side, Side::Sell as u8);
        assert_eq!(order.tokenId, U256::from(67_890_u64));
        assert_eq!(order.feeRateBps, U256::from(50_u64));

        Ok(())
    }

    #[test]
    fn custom_salt_is_used_verbatim() -> anyhow::Result<()> {
        let order = builder().build_order(
            OrderKind::Limit,
            BuildOrderInput::builder()
                .side(Side::Buy)
                .token_id(U256::from(12_345_u64))
                .maker_amount(U256::from(1_000_000_000_000_000_000_u64))
                .taker_amount(U256::from(2_000_000_000_000_000_000_u64))
                .fee_rate_bps(100)
                .salt(123_456_789)
                .build(),
        )?;

        assert_eq!(order.salt, U256::from(123_456_789_u64));

        // Every numeric field crosses the wire as a decimal string.
        let value = to_value(&order)?;
        assert_eq!(value["salt"], serde_json::json!("123456789"));
        assert_eq!(value["feeRateBps"], serde_json::json!("100"));

        Ok(())
    }

    #[test]
    fn random_salts_stay_in_range_and_differ() -> anyhow::Result<()> {
        let first = builder().build_order(OrderKind::Limit, limit_input())?;
        let second = builder().build_order(OrderKind::Limit, limit_input())?;

        assert!(first.salt <= U256::from(MAX_SALT), "salt exceeds MAX_SALT");
        assert!(second.salt <= U256::from(MAX_SALT), "salt exceeds MAX_SALT");
        assert_ne!(first.salt, second.salt, "salts should almost surely differ");

        Ok(())
    }

    #[test]
    fn future_expiration_should_succeed() -> anyhow::Result<()> {
        let expires_at = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();

        let order = builder().build_order(
            OrderKind::Limit,
            BuildOrderInput::builder()
                .side(Side::Buy)
                .token_id(U256::from(12_345_u64))
                .maker_amount(U256::from(1_000_000_000_000_000_000_u64))
                .taker_amount(U256::from(2_000_000_000_000_000_000_u64))
                .fee_rate_bps(100)
                .expires_at(expires_at)
                .build(),
        )?;

        assert_eq!(order.expiration, U256::from(4_102_444_800_u64));

        Ok(())
    }

    #[test]
    fn past_expiration_should_fail() {
        let expires_at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();

        let err = builder()
            .build_order(
                OrderKind::Limit,
                BuildOrderInput::builder()
                    .side(Side::Buy)
                    .token_id(U256::from(12_345_u64))
                    .maker_amount(U256::from(1_000_000_000_000_000_000_u64))
                    .taker_amount(U256::from(2_000_000_000_000_000_000_u64))
                    .fee_rate_bps(100)
                    .expires_at(expires_at)
                    .build(),
            )
            .expect_err("limit orders cannot expire in the past");

        assert_eq!(err.kind(), Kind::InvalidExpiration);
    }

    #[test]
    fn market_expiration_is_taken_verbatim() -> anyhow::Result<()> {
        // Market orders execute immediately; the past-timestamp guard only
        // applies to resting limit orders.
        let expires_at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();

        let order = builder().build_order(
            OrderKind::Market,
            BuildOrderInput::builder()
                .side(Side::Buy)
                .token_id(U256::from(12_345_u64))
                .maker_amount(U256::from(1_000_000_000_000_000_000_u64))
                .taker_amount(U256::from(2_000_000_000_000_000_000_u64))
                .expires_at(expires_at)
                .build(),
        )?;

        assert_eq!(order.expiration, U256::from(946_684_800_u64));

        Ok(())
    }

    #[test]
    fn custom_signature_type_is_kept() -> anyhow::Result<()> {
        let order = builder().build_order(
            OrderKind::Limit,
            BuildOrderInput::builder()
                .side(Side::Buy)
                .token_id(U256::from(12_345_u64))
                .maker_amount(U256::from(1_u64))
                .taker_amount(U256::from(1_u64))
                .signature_type(SignatureType::GnosisSafe)
                .build(),
        )?;

        assert_eq!(order.signatureType, SignatureType::GnosisSafe as u8);

        Ok(())
    }

    #[test]
    fn custom_nonce_is_kept() -> anyhow::Result<()> {
        let order = builder().build_order(
            OrderKind::Limit,
            BuildOrderInput::builder()
                .side(Side::Buy)
                .token_id(U256::from(12_345_u64))
                .maker_amount(U256::from(1_u64))
                .taker_amount(U256::from(1_u64))
                .nonce(7)
                .build(),
        )?;

        assert_eq!(order.nonce, U256::from(7_u64));

        Ok(())
    }
}

mod typed_data {
    use super::*;

    #[test]
    fn domain_pins_exchange_constants() -> anyhow::Result<()> {
        let builder = builder();
        let order = builder.build_order(OrderKind::Limit, limit_input())?;

        let typed_data = builder.build_typed_data(&order, false, false)?;

        assert_eq!(typed_data.primary_type, "Order");
        assert_eq!(typed_data.domain.name, "predict.fun CTF Exchange");
        assert_eq!(typed_data.domain.version, "1");
        assert_eq!(typed_data.domain.chain_id, BNB_MAINNET);
        assert_eq!(
            typed_data.domain.verifying_contract,
            contract_config(BNB_MAINNET, false).unwrap().exchange
        );

        let value = to_value(&typed_data)?;
        assert!(value["types"]["Order"].is_array());
        assert!(value["types"]["EIP712Domain"].is_array());

        Ok(())
    }

    #[test]
    fn neg_risk_selects_other_verifying_contract() -> anyhow::Result<()> {
        let builder = builder();
        let order = builder.build_order(OrderKind::Limit, limit_input())?;

        let standard = builder.build_typed_data(&order, false, false)?;
        let neg_risk = builder.build_typed_data(&order, true, false)?;

        assert_eq!(
            neg_risk.domain.verifying_contract,
            contract_config(BNB_MAINNET, true).unwrap().exchange
        );
        assert_ne!(
            standard.domain.verifying_contract,
            neg_risk.domain.verifying_contract
        );
        assert_ne!(standard.signing_hash(), neg_risk.signing_hash());

        Ok(())
    }

    #[test]
    fn yield_bearing_selects_other_verifying_contract() -> anyhow::Result<()> {
        let builder = builder();
        let order = builder.build_order(OrderKind::Limit, limit_input())?;

        let standard = builder.build_typed_data(&order, false, false)?;
        let yield_bearing = builder.build_typed_data(&order, false, true)?;

        assert_eq!(
            yield_bearing.domain.verifying_contract,
            contract_config(BNB_MAINNET, false)
                .unwrap()
                .yield_bearing_exchange
        );
        assert_ne!(standard.signing_hash(), yield_bearing.signing_hash());

        Ok(())
    }

    #[test]
    fn testnet_builder_uses_testnet_domain() -> anyhow::Result<()> {
        let builder = OrderBuilder::make(BNB_TESTNET);
        let order = builder.build_order(OrderKind::Limit, limit_input())?;

        let typed_data = builder.build_typed_data(&order, false, false)?;

        assert_eq!(typed_data.domain.chain_id, BNB_TESTNET);
        assert_eq!(
            typed_data.domain.verifying_contract,
            contract_config(BNB_TESTNET, false).unwrap().exchange
        );

        Ok(())
    }

    #[test]
    fn assembly_is_deterministic() -> anyhow::Result<()> {
        let builder = builder();
        let order = builder.build_order(
            OrderKind::Limit,
            BuildOrderInput::builder()
                .side(Side::Buy)
                .token_id(U256::from(12_345_u64))
                .maker_amount(U256::from(1_u64))
                .taker_amount(U256::from(1_u64))
                .salt(42)
                .build(),
        )?;

        let first = builder.build_typed_data(&order, false, false)?;
        let second = builder.build_typed_data(&order, false, false)?;

        assert_eq!(first.signing_hash(), second.signing_hash());
        assert_eq!(first, second);

        Ok(())
    }
}

mod signing {
    use super::*;

    #[test]
    fn maker_defaulting_to_signer_should_succeed() -> anyhow::Result<()> {
        let signer = PrivateKeySigner::from_str(PRIVATE_KEY)?;
        let signer_address = signer.address();
        let builder = builder().with_signer(signer);

        let order = builder.build_order(OrderKind::Limit, limit_input())?;

        assert_eq!(order.maker, signer_address);
        assert_eq!(order.signer, signer_address);

        Ok(())
    }

    #[test]
    fn explicit_maker_matching_signer_should_succeed() -> anyhow::Result<()> {
        let signer = PrivateKeySigner::from_str(PRIVATE_KEY)?;
        let signer_address = signer.address();
        let builder = builder().with_signer(signer);

        let order = builder.build_order(
            OrderKind::Limit,
            BuildOrderInput::builder()
                .side(Side::Buy)
                .token_id(U256::from(12_345_u64))
                .maker_amount(U256::from(1_u64))
                .taker_amount(U256::from(1_u64))
                .maker(signer_address)
                .build(),
        )?;

        assert_eq!(order.maker, signer_address);

        Ok(())
    }

    #[test]
    fn mismatched_maker_should_fail() -> anyhow::Result<()> {
        let signer = PrivateKeySigner::from_str(PRIVATE_KEY)?;
        let builder = builder().with_signer(signer);

        let err = builder
            .build_order(
                OrderKind::Limit,
                BuildOrderInput::builder()
                    .side(Side::Buy)
                    .token_id(U256::from(12_345_u64))
                    .maker_amount(U256::from(1_u64))
                    .taker_amount(U256::from(1_u64))
                    .maker(address!("0xd1615A7B6146cDbA40a559eC876A3bcca4050890"))
                    .build(),
            )
            .expect_err("maker differs from the configured signer");

        assert_eq!(err.kind(), Kind::MakerSignerMismatch);

        Ok(())
    }

    #[tokio::test]
    async fn sign_without_signer_should_fail() -> anyhow::Result<()> {
        let builder = builder();
        let order = builder.build_order(OrderKind::Limit, limit_input())?;
        let typed_data = builder.build_typed_data(&order, false, false)?;

        let err = builder
            .sign_typed_data_order(&typed_data)
            .await
            .expect_err("no signer capability configured");

        assert_eq!(err.kind(), Kind::MissingSigner);

        Ok(())
    }

    #[tokio::test]
    async fn sign_with_local_signer_should_succeed() -> anyhow::Result<()> {
        let signer = PrivateKeySigner::from_str(PRIVATE_KEY)?;
        let builder = builder().with_signer(signer);

        let order = builder.build_order(
            OrderKind::Limit,
            BuildOrderInput::builder()
                .side(Side::Buy)
                .token_id(U256::from(12_345_u64))
                .maker_amount(U256::from(1_000_000_000_000_000_000_u64))
                .taker_amount(U256::from(2_000_000_000_000_000_000_u64))
                .fee_rate_bps(100)
                .salt(1)
                .build(),
        )?;
        let typed_data = builder.build_typed_data(&order, false, false)?;

        let signature = builder.sign_typed_data_order(&typed_data).await?;

        // 65 bytes: r || s || v
        assert_eq!(signature.as_bytes().len(), 65, "signature must be 65 bytes");

        // Deterministic signing: the same payload yields the same signature.
        let again = builder.sign_typed_data_order(&typed_data).await?;
        assert_eq!(signature, again);

        Ok(())
    }
}
