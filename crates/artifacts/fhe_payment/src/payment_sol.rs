//! `payment/Payment.sol`, identical for every catalog

use overloads::GenerationPlan;
use shared::utils::solidity_header;
use shared::{CodegenResult, SourceTemplate};
use std::path::PathBuf;

pub struct PaymentTemplate;

impl SourceTemplate<GenerationPlan> for PaymentTemplate {
    fn path(&self, _plan: &GenerationPlan) -> PathBuf {
        PathBuf::from("payment/Payment.sol")
    }

    fn render(&self, _plan: &GenerationPlan) -> CodegenResult<String> {
        Ok(format!(
            r#"{header}
interface IFHEPayment {{
    function depositETH(address account) external payable;
    function withdrawETH(uint256 amount, address receiver) external;
    function getAvailableDepositsETH(address account) external view returns (uint256);
}}

library Payment {{
    function depositForAccount(address account, uint256 amount) internal {{
        Impl.FHEVMConfigStruct storage $ = Impl.getFHEVMConfig();
        IFHEPayment($.FHEPaymentAddress).depositETH{{value: amount}}(account);
    }}

    function depositForThis(uint256 amount) internal {{
        depositForAccount(address(this), amount);
    }}

    function withdrawToAccount(address account, uint256 amount) internal {{
        Impl.FHEVMConfigStruct storage $ = Impl.getFHEVMConfig();
        IFHEPayment($.FHEPaymentAddress).withdrawETH(amount, account);
    }}

    function withdrawToThis(uint256 amount) internal {{
        withdrawToAccount(address(this), amount);
    }}

    function getDepositedBalanceOfAccount(address account) internal view returns (uint256) {{
        Impl.FHEVMConfigStruct storage $ = Impl.getFHEVMConfig();
        return IFHEPayment($.FHEPaymentAddress).getAvailableDepositsETH(account);
    }}

    function getDepositedBalanceOfThis() internal view returns (uint256) {{
        return getDepositedBalanceOfAccount(address(this));
    }}
}}
"#,
            header = solidity_header(&["../lib/Impl.sol"]),
        ))
    }
}
