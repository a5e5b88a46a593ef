//! Leaf record encoding
//!
//! Converts raw leaf records (ordered tuples of ABI-typed fields) into their
//! 32-byte leaf hashes. Two modes are supported, mirroring the two ways a
//! Solidity verifier can hash a claim:
//!
//! - [`EncodeMode::Direct`]: `keccak256(abi.encodePacked(...))` over the
//!   fields, each packed at its natural width.
//! - [`EncodeMode::AbiEncoded`]: canonical ABI parameter encoding against an
//!   explicit type signature, then keccak-256 of the encoded bytes.

use crate::core::{error::*, hash::keccak, types::Hash};
use alloy_dyn_abi::{DynSolType, DynSolValue};

/// How leaf records are turned into leaf hashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeMode {
    /// Hash the packed field bytes directly (`keccak256(abi.encodePacked(..))`)
    #[default]
    Direct,
    /// ABI-encode the fields against a type signature, then hash
    AbiEncoded,
}

/// One leaf record: an ordered tuple of heterogeneous ABI values
#[derive(Debug, Clone, PartialEq)]
pub struct LeafRecord {
    fields: Vec<DynSolValue>,
}

impl LeafRecord {
    /// Create a record from its ordered fields
    pub fn new(fields: Vec<DynSolValue>) -> Self {
        Self { fields }
    }

    /// The ordered fields of this record
    pub fn fields(&self) -> &[DynSolValue] {
        &self.fields
    }

    /// Canonical lookup key: per-field renderings joined with `,`.
    ///
    /// Replaces structural equality on composite keys; two records with the
    /// same field values always produce the same key.
    pub fn key(&self) -> String {
        let parts: Vec<String> = self.fields.iter().map(render_field).collect();
        parts.join(",")
    }
}

impl From<Vec<DynSolValue>> for LeafRecord {
    fn from(fields: Vec<DynSolValue>) -> Self {
        Self::new(fields)
    }
}

fn render_field(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(a) => format!("0x{}", hex::encode(a.as_slice())),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::FixedBytes(word, size) => {
            format!("0x{}", hex::encode(&word.as_slice()[..*size]))
        }
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => s.clone(),
        // composite values fall back to their packed encoding
        other => format!("0x{}", hex::encode(other.abi_encode_packed())),
    }
}

/// Validated leaf encoder: an encoding mode plus, in ABI mode, the parsed
/// type signature the records must match.
#[derive(Debug, Clone)]
pub struct LeafEncoder {
    mode: EncodeMode,
    schema: Option<Vec<DynSolType>>,
}

impl LeafEncoder {
    /// Encoder for [`EncodeMode::Direct`]
    pub fn direct() -> Self {
        Self {
            mode: EncodeMode::Direct,
            schema: None,
        }
    }

    /// Encoder for [`EncodeMode::AbiEncoded`] with the given type signature,
    /// e.g. `["uint256", "address", "uint256"]`
    pub fn abi_encoded<S: AsRef<str>>(type_names: &[S]) -> Result<Self> {
        if type_names.is_empty() {
            return Err(DistributorError::configuration(
                "ABI encoding requires a non-empty type signature",
            ));
        }
        let schema = type_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                name.parse::<DynSolType>().map_err(|e| {
                    DistributorError::configuration(format!("invalid type name `{name}`: {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            mode: EncodeMode::AbiEncoded,
            schema: Some(schema),
        })
    }

    /// Build an encoder from construction options. A type signature is
    /// mandatory in ABI mode and ignored in direct mode.
    pub fn from_options(mode: EncodeMode, type_signature: Option<&[String]>) -> Result<Self> {
        match mode {
            EncodeMode::Direct => Ok(Self::direct()),
            EncodeMode::AbiEncoded => match type_signature {
                Some(names) => Self::abi_encoded(names),
                None => Err(DistributorError::configuration(
                    "encoding mode is AbiEncoded but no type signature was specified",
                )),
            },
        }
    }

    /// The encoding mode of this encoder
    pub fn mode(&self) -> EncodeMode {
        self.mode
    }

    /// Encode one record into its leaf hash
    pub fn encode(&self, record: &LeafRecord) -> Result<Hash> {
        match self.mode {
            EncodeMode::Direct => {
                let mut packed = Vec::new();
                for field in record.fields() {
                    packed.extend_from_slice(&field.abi_encode_packed());
                }
                Ok(keccak(&packed))
            }
            EncodeMode::AbiEncoded => {
                let schema = self.schema.as_ref().ok_or_else(|| {
                    DistributorError::configuration("ABI encoder has no type signature")
                })?;
                if schema.len() != record.fields().len() {
                    return Err(DistributorError::configuration(format!(
                        "type signature has {} types but record has {} fields",
                        schema.len(),
                        record.fields().len()
                    )));
                }
                for (i, (ty, field)) in schema.iter().zip(record.fields()).enumerate() {
                    if !ty.matches(field) {
                        return Err(DistributorError::configuration(format!(
                            "field {i} does not match type `{}`",
                            ty.sol_type_name()
                        )));
                    }
                }
                let encoded = DynSolValue::Tuple(record.fields().to_vec()).abi_encode_params();
                Ok(keccak(&encoded))
            }
        }
    }

    /// Encode a sequence of records, preserving order
    pub fn encode_all(&self, records: &[LeafRecord]) -> Result<Vec<Hash>> {
        records.iter().map(|r| self.encode(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    fn claim_record(index: u64, account: &str, amount: u64) -> LeafRecord {
        LeafRecord::new(vec![
            DynSolValue::Uint(U256::from(index), 256),
            DynSolValue::Address(account.parse::<Address>().unwrap()),
            DynSolValue::Uint(U256::from(amount), 256),
        ])
    }

    const ACCOUNT_0: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

    #[test]
    fn test_abi_encoded_leaf_matches_reference() {
        let encoder = LeafEncoder::abi_encoded(&["uint256", "address", "uint256"]).unwrap();
        let hash = encoder.encode(&claim_record(0, ACCOUNT_0, 100)).unwrap();
        assert_eq!(
            hash.to_hex(),
            "0x6a2c1360eb6c65962db32899b4bea78100306f4d4c54d08c6c610217f4ce1890"
        );
    }

    #[test]
    fn test_direct_leaf_matches_reference() {
        let encoder = LeafEncoder::direct();
        let hash = encoder.encode(&claim_record(0, ACCOUNT_0, 100)).unwrap();
        assert_eq!(
            hash.to_hex(),
            "0x3c0623f2d36982a18465029d0b8319da2ebb3a48437220d4b274082b6b0f6038"
        );
    }

    #[test]
    fn test_modes_disagree() {
        let record = claim_record(1, ACCOUNT_0, 200);
        let direct = LeafEncoder::direct().encode(&record).unwrap();
        let abi = LeafEncoder::abi_encoded(&["uint256", "address", "uint256"])
            .unwrap()
            .encode(&record)
            .unwrap();
        assert_ne!(direct, abi);
    }

    #[test]
    fn test_abi_mode_requires_signature() {
        let err = LeafEncoder::from_options(EncodeMode::AbiEncoded, None).unwrap_err();
        assert!(matches!(err, DistributorError::ConfigurationError { .. }));

        let empty: [&str; 0] = [];
        assert!(LeafEncoder::abi_encoded(&empty).is_err());
    }

    #[test]
    fn test_invalid_type_name_rejected() {
        assert!(LeafEncoder::abi_encoded(&["uint256", "not_a_type"]).is_err());
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        let encoder = LeafEncoder::abi_encoded(&["uint256", "address"]).unwrap();
        let err = encoder.encode(&claim_record(0, ACCOUNT_0, 100)).unwrap_err();
        assert!(matches!(err, DistributorError::ConfigurationError { .. }));
    }

    #[test]
    fn test_field_type_mismatch_rejected() {
        let encoder = LeafEncoder::abi_encoded(&["address", "address", "address"]).unwrap();
        assert!(encoder.encode(&claim_record(0, ACCOUNT_0, 100)).is_err());
    }

    #[test]
    fn test_record_key_is_stable() {
        let a = claim_record(0, ACCOUNT_0, 100);
        let b = claim_record(0, ACCOUNT_0, 100);
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key(), format!("0,{ACCOUNT_0},100"));
        assert_ne!(a.key(), claim_record(1, ACCOUNT_0, 100).key());
    }
}
