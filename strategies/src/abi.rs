//! Contract interfaces the strategies read from.

use alloy_sol_types::sol;

sol! {
    /// ERC-20 balance function signature.
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }

    /// ERC-721 owned token count.
    interface IERC721 {
        function balanceOf(address owner) external view returns (uint256);
    }

    /// ThriveCoin voter allow-list.
    interface IThriveCoinVoterList {
        function hasVoteRight(address account) external view returns (bool);
    }

    /// ApeCoin staking pool totals.
    interface IApeCoinStaking {
        function stakedTotal(address _address) external view returns (uint256);
    }

    interface IENSRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    interface IENSResolver {
        function addr(bytes32 node) external view returns (address);
        function name(bytes32 node) external view returns (string memory);
    }
}
