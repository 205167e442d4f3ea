//! Signing capability used by [`OrderBuilder`](crate::builder::OrderBuilder).

use alloy::primitives::{Address, B256, Signature};
use alloy::signers::Signer;
use async_trait::async_trait;

use crate::Result;

/// Capability that turns an EIP-712 signing hash into a 65-byte secp256k1
/// signature.
///
/// Blanket-implemented for every [`alloy::signers::Signer`], which keeps
/// in-process keys, remote KMS backends and hardware wallets
/// interchangeable. The hash construction happens in the SDK; a capability
/// only ever sees the final digest.
#[async_trait]
pub trait OrderSigner: Send + Sync {
    /// Address of the key this capability signs with.
    fn address(&self) -> Address;

    /// Signs the provided EIP-712 signing hash.
    async fn sign_order_hash(&self, hash: B256) -> Result<Signature>;
}

#[async_trait]
impl<S> OrderSigner for S
where
    S: Signer + Send + Sync,
{
    fn address(&self) -> Address {
        Signer::address(self)
    }

    async fn sign_order_hash(&self, hash: B256) -> Result<Signature> {
        Ok(self.sign_hash(&hash).await?)
    }
}
