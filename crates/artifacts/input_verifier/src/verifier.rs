//! `InputVerifier.{native,coprocessor}.sol` generation
//!
//! Handle layout checked by `verifyCiphertext` (least significant byte first):
//! version (1 byte), type code (1 byte), chain id (8 bytes), index of the
//! handle inside its proof (1 byte), then the ciphertext hash.
//!
//! Proof layout: one byte holding the number of handles, the handles
//! themselves (32 bytes each), then the backend signature(s).

use crate::mode::VerificationMode;
use catalog::BitWidth;
use itertools::Itertools;
use overloads::GenerationPlan;
use shared::utils::{indent, solidity_header};
use shared::{CodegenResult, SourceTemplate};
use std::path::PathBuf;

/// Version of the handle format this verifier accepts
pub const HANDLE_VERSION: u8 = 0;

/// Semantic version written into the generated contract
pub const CONTRACT_VERSION: &str = "0.1.0";

pub struct InputVerifierTemplate {
    pub mode: VerificationMode,
}

impl InputVerifierTemplate {
    pub fn new(mode: VerificationMode) -> Self {
        Self { mode }
    }
}

/// Boolean expression accepting exactly the type codes of `widths`
fn type_whitelist(widths: &[BitWidth]) -> String {
    if widths.is_empty() {
        return "false".to_string();
    }
    widths
        .iter()
        .map(|w| format!("typeCt == {}", w.type_code()))
        .join(" || ")
}

/// Backend-specific pieces of the contract
struct Backend {
    imports: &'static [&'static str],
    preamble: &'static str,
    inheritance: &'static str,
    declarations: &'static str,
    check: &'static str,
}

fn backend(mode: VerificationMode) -> Backend {
    match mode {
        VerificationMode::Native => Backend {
            imports: &["../addresses/KMSVerifierAddress.sol"],
            preamble: r#"interface IKMSVerifier {
    function verifyInputEIP712KMSSignatures(
        bytes32[] memory handlesList,
        address userAddress,
        address contractAddress,
        bytes memory signatures
    ) external returns (bool);
}
"#,
            inheritance: "",
            declarations: "IKMSVerifier private constant kmsVerifier = IKMSVerifier(kmsVerifierAdd);",
            check: r#"require(
    kmsVerifier.verifyInputEIP712KMSSignatures(handles, context.userAddress, context.contractAddress, signatures),
    "Not verified by KMS"
);"#,
        },
        VerificationMode::Coprocessor => Backend {
            imports: &[
                "../addresses/CoprocessorAddress.sol",
                "@openzeppelin/contracts/utils/cryptography/ECDSA.sol",
                "@openzeppelin/contracts/utils/cryptography/EIP712.sol",
            ],
            preamble: "",
            inheritance: " is EIP712",
            declarations: r#"struct CiphertextVerification {
    bytes32[] handlesList;
    address userAddress;
    address contractAddress;
}

string public constant CIPHERTEXT_VERIFICATION_TYPE =
    "CiphertextVerification(bytes32[] handlesList,address userAddress,address contractAddress)";
bytes32 private constant CIPHERTEXT_VERIFICATION_TYPEHASH = keccak256(bytes(CIPHERTEXT_VERIFICATION_TYPE));

address private constant coprocessorSigner = coprocessorAdd;

constructor() EIP712(CONTRACT_NAME, "1") {}

function hashCiphertextVerification(CiphertextVerification memory cv) internal view returns (bytes32) {
    return
        _hashTypedDataV4(
            keccak256(
                abi.encode(
                    CIPHERTEXT_VERIFICATION_TYPEHASH,
                    keccak256(abi.encodePacked(cv.handlesList)),
                    cv.userAddress,
                    cv.contractAddress
                )
            )
        );
}"#,
            check: r#"require(signatures.length == 65, "Invalid signature length");
bytes32 digest = hashCiphertextVerification(
    CiphertextVerification(handles, context.userAddress, context.contractAddress)
);
require(ECDSA.recover(digest, signatures) == coprocessorSigner, "Not signed by coprocessor");"#,
        },
    }
}

impl SourceTemplate<GenerationPlan> for InputVerifierTemplate {
    fn path(&self, _plan: &GenerationPlan) -> PathBuf {
        PathBuf::from("lib").join(self.mode.file_name())
    }

    fn render(&self, plan: &GenerationPlan) -> CodegenResult<String> {
        let backend = backend(self.mode);
        let preamble = if backend.preamble.is_empty() {
            String::new()
        } else {
            format!("\n{}", backend.preamble)
        };

        Ok(format!(
            r#"{header}{preamble}
/**
 * @title   InputVerifier ({mode})
 * @notice  Checks that an input handle was attested together with its proof.
 */
contract InputVerifier{inheritance} {{
    struct ContextUserInputs {{
        address aclAddress;
        address userAddress;
        address contractAddress;
    }}

    string private constant CONTRACT_NAME = "InputVerifier";

    /// @notice Handle format version accepted by this verifier
    uint8 public constant HANDLE_VERSION = {handle_version};

{declarations}

    function getVersion() external pure returns (string memory) {{
        return "InputVerifier v{version} ({mode})";
    }}

    function isSupportedType(uint8 typeCt) internal pure returns (bool) {{
        return {whitelist};
    }}

    function verifyCiphertext(
        ContextUserInputs memory context,
        bytes32 inputHandle,
        bytes memory inputProof
    ) external returns (uint256) {{
        uint256 result = uint256(inputHandle);
        require(uint8(result) == HANDLE_VERSION, "Wrong handle version");
        require(isSupportedType(uint8(result >> 8)), "Unsupported type");
        require(uint64(result >> 16) == block.chainid, "Wrong chain id");
        uint8 indexHandle = uint8(result >> 80);

        require(inputProof.length > 0, "Empty input proof");
        uint256 numHandles = uint8(inputProof[0]);
        require(indexHandle < numHandles, "Invalid index");
        require(inputProof.length >= 1 + 32 * numHandles, "Truncated input proof");

        bytes32[] memory handles = new bytes32[](numHandles);
        for (uint256 i = 0; i < numHandles; i++) {{
            bytes32 element;
            assembly {{
                element := mload(add(inputProof, add(33, mul(i, 32))))
            }}
            handles[i] = element;
        }}
        require(handles[indexHandle] == inputHandle, "Wrong input handle");

        uint256 signaturesOffset = 1 + 32 * numHandles;
        bytes memory signatures = new bytes(inputProof.length - signaturesOffset);
        for (uint256 i = 0; i < signatures.length; i++) {{
            signatures[i] = inputProof[signaturesOffset + i];
        }}

{check}
        return result;
    }}
}}
"#,
            header = solidity_header(backend.imports),
            mode = self.mode,
            inheritance = backend.inheritance,
            handle_version = HANDLE_VERSION,
            declarations = indent(backend.declarations, 1),
            version = CONTRACT_VERSION,
            whitelist = type_whitelist(&plan.catalog.widths()),
            check = indent(backend.check, 2),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, Operator, PricingTable};
    use overloads::PlanConfig;

    fn plan(widths: &[BitWidth]) -> GenerationPlan {
        let catalog = Catalog::new(vec![Operator::unary("not", widths.iter().copied())]).unwrap();
        GenerationPlan::build(catalog, PricingTable::default(), PlanConfig::default()).unwrap()
    }

    #[test]
    fn test_type_whitelist_follows_catalog_widths() {
        assert_eq!(
            type_whitelist(&[BitWidth::Bool, BitWidth::W8, BitWidth::W256]),
            "typeCt == 0 || typeCt == 2 || typeCt == 8"
        );
        assert_eq!(type_whitelist(&[]), "false");

        let source = InputVerifierTemplate::new(VerificationMode::Native)
            .render(&plan(&[BitWidth::W4, BitWidth::W16]))
            .unwrap();
        assert!(source.contains("        return typeCt == 1 || typeCt == 3;"));
    }

    #[test]
    fn test_variants_share_entry_point() {
        let plan = plan(&[BitWidth::Bool, BitWidth::W8]);
        for mode in VerificationMode::ALL {
            let source = InputVerifierTemplate::new(mode).render(&plan).unwrap();
            assert!(source.contains("    function verifyCiphertext(\n        ContextUserInputs memory context,"));
            assert!(source.contains("require(uint64(result >> 16) == block.chainid, \"Wrong chain id\");"));
            assert!(source.contains(&format!("\"InputVerifier v{CONTRACT_VERSION} ({mode})\"")));
        }
    }

    #[test]
    fn test_native_uses_kms_verifier() {
        let source = InputVerifierTemplate::new(VerificationMode::Native)
            .render(&plan(&[BitWidth::W8]))
            .unwrap();
        assert!(source.contains("import \"../addresses/KMSVerifierAddress.sol\";"));
        assert!(source.contains("interface IKMSVerifier {"));
        assert!(source.contains("contract InputVerifier {"));
        assert!(source.contains("            kmsVerifier.verifyInputEIP712KMSSignatures("));
        assert!(!source.contains("EIP712("));
    }

    #[test]
    fn test_coprocessor_checks_eip712_signature() {
        let template = InputVerifierTemplate::new(VerificationMode::Coprocessor);
        let plan = plan(&[BitWidth::W8]);
        let source = template.render(&plan).unwrap();
        assert!(source.contains("contract InputVerifier is EIP712 {"));
        assert!(source.contains("    constructor() EIP712(CONTRACT_NAME, \"1\") {}"));
        assert!(source.contains("        require(ECDSA.recover(digest, signatures) == coprocessorSigner, \"Not signed by coprocessor\");"));
        assert!(!source.contains("IKMSVerifier"));
        assert_eq!(
            template.path(&plan),
            PathBuf::from("lib/InputVerifier.coprocessor.sol")
        );
    }
}
