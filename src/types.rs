multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Proposal Status — lifecycle states
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum ProposalStatus {
    /// Created. Voting is open until the window closes, then awaiting resolution.
    Pending,
    /// Funds sent to the recipient. Terminal state.
    Executed,
    /// Window closed with yes <= no. Terminal state.
    Rejected,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProposalStatus::Pending)
    }
}

// ============================================================
// Proposal — the core governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub proposer: ManagedAddress<M>,
    pub recipient: ManagedAddress<M>,
    pub amount: BigUint<M>,
    pub description: ManagedBuffer<M>,
    pub created_at: u64,
    pub votes_for: BigUint<M>,
    pub votes_against: BigUint<M>,
    pub status: ProposalStatus,
}

impl<M: ManagedTypeApi> Proposal<M> {
    /// Block timestamp at which voting closes and resolution opens.
    pub fn voting_ends_at(&self, voting_period: u64) -> u64 {
        self.created_at.saturating_add(voting_period)
    }

    /// Strict majority of snapshotted vote weight.
    pub fn has_passed(&self) -> bool {
        self.votes_for > self.votes_against
    }
}
