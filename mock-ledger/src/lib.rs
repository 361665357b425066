#![no_std]

multiversx_sc::imports!();

pub mod mock_ledger_proxy;

/// Minimal fungible-token ledger: mint, transfer, balance query.
///
/// Stands in for a production token contract when exercising the DAO fund.
/// Balances live in contract storage; there is no approval flow.
#[multiversx_sc::contract]
pub trait MockLedger {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    /// Credits `amount` to `to` out of thin air. Unrestricted, test use only.
    #[endpoint(mint)]
    fn mint(&self, to: ManagedAddress, amount: BigUint) {
        self.balances(&to).update(|b| *b += &amount);
        self.total_supply().update(|s| *s += &amount);

        self.transfer_event(&ManagedAddress::zero(), &to, &amount);
    }

    /// Moves `amount` from the caller to `to`.
    #[endpoint(transfer)]
    fn transfer(&self, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        let balance = self.balances(&caller).get();
        require!(balance >= amount, "Insufficient balance");

        self.balances(&caller).set(&(balance - &amount));
        self.balances(&to).update(|b| *b += &amount);

        self.transfer_event(&caller, &to, &amount);
    }

    #[view(balanceOf)]
    fn balance_of(&self, account: &ManagedAddress) -> BigUint {
        self.balances(account).get()
    }

    #[view(totalSupply)]
    #[storage_mapper("totalSupply")]
    fn total_supply(&self) -> SingleValueMapper<BigUint>;

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[storage_mapper("balances")]
    fn balances(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;
}
