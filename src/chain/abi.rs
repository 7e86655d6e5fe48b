// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract interfaces
//!
//! The `sol!` macro generates `SIGNATURE_HASH` constants for events and typed
//! call builders for functions, so no ABI JSON is needed at runtime.

use alloy_sol_types::sol;

sol! {
    /// Bonding-curve pool ("core") trading one token against the quote asset.
    #[sol(rpc)]
    interface IOsitoCore {
        /// Emitted on every trade.
        ///
        /// `tokenIn` is true when the pool's token was sold into the pool and
        /// the quote asset was paid out.
        #[derive(Debug)]
        event Swap(
            address indexed user,
            bool tokenIn,
            uint256 amountIn,
            uint256 amountOut,
            uint256 fee
        );

        /// Address of the pool's token
        function TOK() external view returns (address);

        /// Current reserves: token, quote, and two curve parameters
        function R() external view returns (
            uint128 tokenReserve,
            uint128 quoteReserve,
            uint128 curveK,
            uint128 curveB
        );
    }
}

sol! {
    /// ERC-20 metadata getters
    #[sol(rpc)]
    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{keccak256, Address, LogData, U256};
    use alloy_sol_types::{SolEvent, SolValue};

    #[test]
    fn swap_signature_matches_abi() {
        assert_eq!(
            IOsitoCore::Swap::SIGNATURE,
            "Swap(address,bool,uint256,uint256,uint256)"
        );
        assert_eq!(
            IOsitoCore::Swap::SIGNATURE_HASH,
            keccak256("Swap(address,bool,uint256,uint256,uint256)")
        );
    }

    #[test]
    fn decodes_swap_log_data() {
        let user = Address::repeat_byte(0x42);
        let data = (true, U256::from(1000u64), U256::from(500u64), U256::from(3u64))
            .abi_encode_params();
        let log = LogData::new_unchecked(
            vec![IOsitoCore::Swap::SIGNATURE_HASH, user.into_word()],
            data.into(),
        );

        let swap = IOsitoCore::Swap::decode_log_data(&log).unwrap();
        assert_eq!(swap.user, user);
        assert!(swap.tokenIn);
        assert_eq!(swap.amountIn, U256::from(1000u64));
        assert_eq!(swap.amountOut, U256::from(500u64));
        assert_eq!(swap.fee, U256::from(3u64));
    }
}
