//! Typed token calls bound to a signer

use ourtoken_abi::{AbiError, FunctionDef, Token as AbiToken};
use ourtoken_primitives::{Address, U256};
use ourtoken_token::interface;

use crate::{DevChain, DevChainError, DevChainResult, Receipt, Signer};

/// Token contract at a known address, acting as `signer`
///
/// Reads run as read-only calls; writes are signed transactions mined on
/// the chain passed in.
#[derive(Clone, Debug)]
pub struct TokenHandle {
    address: Address,
    signer: Signer,
}

impl TokenHandle {
    /// Attach to the contract at `address`
    pub fn at(chain: &DevChain, address: Address, signer: Signer) -> DevChainResult<Self> {
        if !chain.has_contract(&address) {
            return Err(DevChainError::UnknownContract(address));
        }
        Ok(Self { address, signer })
    }

    /// Same contract, different signer
    pub fn connect(&self, signer: Signer) -> Self {
        Self {
            address: self.address,
            signer,
        }
    }

    /// Contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Acting signer
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// `name()`
    pub fn name(&self, chain: &DevChain) -> DevChainResult<String> {
        let value = self.read(chain, "name", &[])?;
        value.into_string().ok_or_else(|| bad_output("name"))
    }

    /// `symbol()`
    pub fn symbol(&self, chain: &DevChain) -> DevChainResult<String> {
        let value = self.read(chain, "symbol", &[])?;
        value.into_string().ok_or_else(|| bad_output("symbol"))
    }

    /// `decimals()`
    pub fn decimals(&self, chain: &DevChain) -> DevChainResult<u8> {
        let value = self.read(chain, "decimals", &[])?;
        value
            .into_uint()
            .and_then(|d| u8::try_from(d.low_u64()).ok())
            .ok_or_else(|| bad_output("decimals"))
    }

    /// `totalSupply()`
    pub fn total_supply(&self, chain: &DevChain) -> DevChainResult<U256> {
        self.read_uint(chain, "totalSupply", &[])
    }

    /// `balanceOf(account)`
    pub fn balance_of(&self, chain: &DevChain, account: Address) -> DevChainResult<U256> {
        self.read_uint(chain, "balanceOf", &[AbiToken::Address(account)])
    }

    /// `allowance(owner, spender)`
    pub fn allowance(
        &self,
        chain: &DevChain,
        owner: Address,
        spender: Address,
    ) -> DevChainResult<U256> {
        self.read_uint(
            chain,
            "allowance",
            &[AbiToken::Address(owner), AbiToken::Address(spender)],
        )
    }

    /// `transfer(to, amount)`
    pub fn transfer(
        &self,
        chain: &mut DevChain,
        to: Address,
        amount: U256,
    ) -> DevChainResult<Receipt> {
        self.write(
            chain,
            "transfer",
            &[AbiToken::Address(to), AbiToken::Uint(amount)],
        )
    }

    /// `approve(spender, amount)`
    pub fn approve(
        &self,
        chain: &mut DevChain,
        spender: Address,
        amount: U256,
    ) -> DevChainResult<Receipt> {
        self.write(
            chain,
            "approve",
            &[AbiToken::Address(spender), AbiToken::Uint(amount)],
        )
    }

    /// `transferFrom(from, to, amount)`
    pub fn transfer_from(
        &self,
        chain: &mut DevChain,
        from: Address,
        to: Address,
        amount: U256,
    ) -> DevChainResult<Receipt> {
        self.write(
            chain,
            "transferFrom",
            &[
                AbiToken::Address(from),
                AbiToken::Address(to),
                AbiToken::Uint(amount),
            ],
        )
    }

    fn read(&self, chain: &DevChain, name: &str, args: &[AbiToken]) -> DevChainResult<AbiToken> {
        let function = function(name)?;
        let output = chain.call(self.signer.address(), self.address, &function.encode_call(args)?)?;
        function
            .decode_output(&output)?
            .into_iter()
            .next()
            .ok_or_else(|| bad_output(name))
    }

    fn read_uint(&self, chain: &DevChain, name: &str, args: &[AbiToken]) -> DevChainResult<U256> {
        self.read(chain, name, args)?
            .into_uint()
            .ok_or_else(|| bad_output(name))
    }

    fn write(
        &self,
        chain: &mut DevChain,
        name: &str,
        args: &[AbiToken],
    ) -> DevChainResult<Receipt> {
        let data = function(name)?.encode_call(args)?;
        chain.send(&self.signer, self.address, data)
    }
}

fn function(name: &str) -> DevChainResult<&'static FunctionDef> {
    interface::function(name).ok_or_else(|| AbiError::UnknownFunction(name.to_string()).into())
}

fn bad_output(name: &str) -> DevChainError {
    AbiError::Decode(format!("unexpected output from {}", name)).into()
}
