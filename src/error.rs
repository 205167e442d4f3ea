use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use alloy::primitives::{Address, ChainId, U256};
use chrono::{DateTime, Utc};

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A quantity or value below the exchange minimum, or an intent that
    /// resolves to zero fillable size
    InvalidQuantity,
    /// The orderbook cannot satisfy the requested size or value
    InsufficientLiquidity,
    /// A limit order expiration that is not in the future
    InvalidExpiration,
    /// An explicit maker address that differs from the configured signer
    MakerSignerMismatch,
    /// An operation that requires signing was called with no signer capability
    MissingSigner,
    /// A non-finite double reached the fixed-point conversion, or an
    /// arithmetic invariant was violated
    Numeric,
    /// An orderbook tier outside the protocol price or size bounds
    InvalidBook,
    /// Error related to invalid state within predict-client-sdk
    Validation,
    /// Internal error from dependencies
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    #[must_use]
    pub fn invalid_quantity(quantity: U256, minimum: U256) -> Self {
        InvalidQuantity { quantity, minimum }.into()
    }

    #[must_use]
    pub fn insufficient_liquidity(requested: U256, available: U256) -> Self {
        InsufficientLiquidity {
            requested,
            available,
        }
        .into()
    }

    #[must_use]
    pub fn invalid_expiration(expires_at: DateTime<Utc>) -> Self {
        InvalidExpiration { expires_at }.into()
    }

    #[must_use]
    pub fn maker_signer_mismatch(maker: Address, signer: Address) -> Self {
        MakerSignerMismatch { maker, signer }.into()
    }

    #[must_use]
    pub fn missing_signer() -> Self {
        MissingSigner.into()
    }

    pub fn numeric<S: Into<String>>(reason: S) -> Self {
        Numeric {
            reason: reason.into(),
        }
        .into()
    }

    pub fn invalid_book<S: Into<String>>(reason: S) -> Self {
        InvalidBook {
            reason: reason.into(),
        }
        .into()
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Validation {
            reason: message.into(),
        }
        .into()
    }

    #[must_use]
    pub fn missing_contract_config(chain_id: ChainId, neg_risk: bool) -> Self {
        MissingContractConfig { chain_id, neg_risk }.into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct InvalidQuantity {
    pub quantity: U256,
    pub minimum: U256,
}

impl fmt::Display for InvalidQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "quantity {} is below the minimum fillable amount {}",
            self.quantity, self.minimum
        )
    }
}

impl StdError for InvalidQuantity {}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct InsufficientLiquidity {
    pub requested: U256,
    pub available: U256,
}

impl fmt::Display for InsufficientLiquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "book can only fill {} of the requested {}",
            self.available, self.requested
        )
    }
}

impl StdError for InsufficientLiquidity {}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct InvalidExpiration {
    pub expires_at: DateTime<Utc>,
}

impl fmt::Display for InvalidExpiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expiration {} is not in the future", self.expires_at)
    }
}

impl StdError for InvalidExpiration {}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct MakerSignerMismatch {
    pub maker: Address,
    pub signer: Address,
}

impl fmt::Display for MakerSignerMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "maker {} does not match the configured signer {}",
            self.maker, self.signer
        )
    }
}

impl StdError for MakerSignerMismatch {}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct MissingSigner;

impl fmt::Display for MissingSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no signer capability is configured")
    }
}

impl StdError for MissingSigner {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Numeric {
    pub reason: String,
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "numeric: {}", self.reason)
    }
}

impl StdError for Numeric {}

#[non_exhaustive]
#[derive(Debug)]
pub struct InvalidBook {
    pub reason: String,
}

impl fmt::Display for InvalidBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid book: {}", self.reason)
    }
}

impl StdError for InvalidBook {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct MissingContractConfig {
    pub chain_id: ChainId,
    pub neg_risk: bool,
}

impl fmt::Display for MissingContractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing contract config for chain id {} with neg_risk = {}",
            self.chain_id, self.neg_risk,
        )
    }
}

impl StdError for MissingContractConfig {}

impl From<InvalidQuantity> for Error {
    fn from(err: InvalidQuantity) -> Self {
        Error::with_source(Kind::InvalidQuantity, err)
    }
}

impl From<InsufficientLiquidity> for Error {
    fn from(err: InsufficientLiquidity) -> Self {
        Error::with_source(Kind::InsufficientLiquidity, err)
    }
}

impl From<InvalidExpiration> for Error {
    fn from(err: InvalidExpiration) -> Self {
        Error::with_source(Kind::InvalidExpiration, err)
    }
}

impl From<MakerSignerMismatch> for Error {
    fn from(err: MakerSignerMismatch) -> Self {
        Error::with_source(Kind::MakerSignerMismatch, err)
    }
}

impl From<MissingSigner> for Error {
    fn from(err: MissingSigner) -> Self {
        Error::with_source(Kind::MissingSigner, err)
    }
}

impl From<Numeric> for Error {
    fn from(err: Numeric) -> Self {
        Error::with_source(Kind::Numeric, err)
    }
}

impl From<InvalidBook> for Error {
    fn from(err: InvalidBook) -> Self {
        Error::with_source(Kind::InvalidBook, err)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<MissingContractConfig> for Error {
    fn from(err: MissingContractConfig) -> Self {
        Error::with_source(Kind::Internal, err)
    }
}

impl From<alloy::signers::Error> for Error {
    fn from(e: alloy::signers::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}
