//! Development signers

use ourtoken_crypto::{keccak256, private_key_from_hex, public_key_to_address, sign, PrivateKey};
use ourtoken_primitives::{Address, H256};

use crate::DevChainResult;

/// Well-known private keys of the local development node's default accounts
pub const DEV_PRIVATE_KEYS: [&str; 10] = [
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
    "7c852118294e51e653712a81e05800f419141751be58f605c371e15141b007a6",
    "47e179ec197488593b187f80a00eb0da91f1b9d0b13f8733639f19c30a34926a",
    "8b3a350cf5c34c9194ca85829a2df0ec3153be0318b5e2d3348e872092edffba",
    "92db14e403b83dfe3df233f83dfa3a0d7096f21ca9b0d6d6b8d88b2b4ec1564e",
    "4bbbf85ce3377467afe5d46f804f221813b2bb87f24d81f60f1fcdbf7cbf4356",
    "dbda1821b80551c9d65939329250298aa3472ba22feea921c0cf5d620ea67b97",
    "2a871d0798f97d79848a013d4936a73bf4cc922c825d33c1cf7073dff6d409c6",
];

/// Account able to sign transactions
#[derive(Clone)]
pub struct Signer {
    private_key: PrivateKey,
    address: Address,
}

impl Signer {
    /// Create from a hex private key
    pub fn from_hex(hex: &str) -> DevChainResult<Self> {
        Ok(Self::from_key(private_key_from_hex(hex)?))
    }

    fn from_key(private_key: PrivateKey) -> Self {
        let address = public_key_to_address(private_key.verifying_key());
        Self {
            private_key,
            address,
        }
    }

    /// The `index`-th development signer
    ///
    /// Indices past [`DEV_PRIVATE_KEYS`] get a key derived from the index.
    pub fn dev(index: usize) -> DevChainResult<Self> {
        match DEV_PRIVATE_KEYS.get(index) {
            Some(key) => Self::from_hex(key),
            None => {
                let seed = keccak256(format!("ourtoken-dev-signer-{}", index).as_bytes());
                Self::from_hex(&hex::encode(seed.as_bytes()))
            }
        }
    }

    /// First `count` development signers
    pub fn dev_accounts(count: usize) -> DevChainResult<Vec<Self>> {
        (0..count).map(Self::dev).collect()
    }

    /// Account address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a hash
    pub fn sign(&self, hash: &H256) -> DevChainResult<ourtoken_crypto::Signature> {
        Ok(sign(hash, &self.private_key)?)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address.to_hex())
            .finish()
    }
}

impl PartialEq for Signer {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Signer {}

#[cfg(test)]
mod tests {
    use super::*;
    use ourtoken_crypto::recover_address;

    #[test]
    fn test_first_dev_accounts() {
        let signers = Signer::dev_accounts(2).unwrap();
        assert_eq!(
            signers[0].address().to_hex(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(
            signers[1].address().to_hex(),
            "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
        );
    }

    #[test]
    fn test_dev_accounts_are_distinct() {
        let signers = Signer::dev_accounts(12).unwrap();
        for i in 0..signers.len() {
            for j in (i + 1)..signers.len() {
                assert_ne!(signers[i].address(), signers[j].address());
            }
        }
    }

    #[test]
    fn test_derived_signer_is_deterministic() {
        assert_eq!(Signer::dev(42).unwrap(), Signer::dev(42).unwrap());
    }

    #[test]
    fn test_signature_recovers_to_signer() {
        let signer = Signer::dev(3).unwrap();
        let hash = keccak256(b"payload");
        let sig = signer.sign(&hash).unwrap();
        assert_eq!(recover_address(&hash, &sig).unwrap(), signer.address());
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = Signer::dev(0).unwrap();
        let debug = format!("{:?}", signer);
        assert!(debug.contains("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
        assert!(!debug.contains(DEV_PRIVATE_KEYS[0]));
    }
}
