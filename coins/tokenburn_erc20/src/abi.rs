//! Solidity bindings for the burnable token

use alloy::sol;

sol! {
    /// The subset of OpenZeppelin's ERC20Burnable the burn page calls
    #[sol(rpc)]
    #[derive(Debug)]
    contract BurnableToken {
        function burn(uint256 amount) external;
        function totalSupply() external view returns (uint256);
    }
}
