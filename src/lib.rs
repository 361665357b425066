#![no_std]

multiversx_sc::imports!();

pub mod dao_fund_proxy;
pub mod token_ledger_proxy;
pub mod types;

use types::{Proposal, ProposalStatus};

// ============================================================
// Constants
// ============================================================

/// Voting window: 3 days in seconds
pub const VOTING_PERIOD: u64 = 259_200;

/// Whole tokens a caller must hold to open a proposal
pub const MIN_PROPOSAL_TOKENS: u64 = 100;

/// Decimals of the governance token ledger
pub const TOKEN_DECIMALS: u32 = 18;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait DaoFund {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, governance_token: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        self.owner().set(&caller);
        self.governance_token().set(&governance_token);
        self.proposal_count().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: createProposal
    // Gated on the caller's live ledger balance. Nothing is escrowed.
    // ========================================================

    #[endpoint(createProposal)]
    fn create_proposal(
        &self,
        recipient: ManagedAddress,
        amount: BigUint,
        description: ManagedBuffer,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let balance = self.ledger_balance_of(&caller);
        require!(
            balance >= self.min_proposal_balance(),
            "Insufficient tokens to create proposal"
        );
        require!(amount > 0u64, "Amount must be positive");

        let proposal_id = match self.proposal_count().get().checked_add(1) {
            Some(id) => id,
            None => sc_panic!("Proposal id space exhausted"),
        };
        let timestamp = self.blockchain().get_block_timestamp();

        let proposal = Proposal {
            id: proposal_id,
            proposer: caller,
            recipient,
            amount,
            description,
            created_at: timestamp,
            votes_for: BigUint::zero(),
            votes_against: BigUint::zero(),
            status: ProposalStatus::Pending,
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);

        self.proposal_created_event(
            proposal_id,
            &proposal.recipient,
            &proposal.amount,
            &proposal.description,
        );

        proposal_id
    }

    // ========================================================
    // ENDPOINT: vote
    // Yes/No voting weighted by the voter's ledger balance at call time.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, proposal_id: u64, support: bool) {
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );

        let mut proposal = self.proposals(proposal_id).get();
        let now = self.blockchain().get_block_timestamp();
        require!(
            proposal.status == ProposalStatus::Pending
                && now < proposal.voting_ends_at(VOTING_PERIOD),
            "Voting is closed"
        );

        let caller = self.blockchain().get_caller();
        require!(
            !self.voters(proposal_id).contains(&caller),
            "Already voted"
        );

        // Zero-balance voters are recorded but add no weight.
        let weight = self.ledger_balance_of(&caller);

        if support {
            proposal.votes_for += &weight;
        } else {
            proposal.votes_against += &weight;
        }

        self.voters(proposal_id).insert(caller.clone());
        self.proposals(proposal_id).set(&proposal);

        self.voted_event(proposal_id, &caller, support, &weight);
    }

    // ========================================================
    // ENDPOINT: executeProposal
    // After the window, a passed proposal pays out exactly once.
    // ========================================================

    #[endpoint(executeProposal)]
    fn execute_proposal(&self, proposal_id: u64) {
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(
            !proposal.status.is_terminal(),
            "Proposal already resolved"
        );

        let now = self.blockchain().get_block_timestamp();
        require!(
            now >= proposal.voting_ends_at(VOTING_PERIOD),
            "Voting period not ended"
        );
        require!(proposal.has_passed(), "Proposal did not pass");

        let own_address = self.blockchain().get_sc_address();
        let custodial_balance = self.ledger_balance_of(&own_address);
        require!(
            custodial_balance >= proposal.amount,
            "Insufficient custodial balance"
        );

        // Mark before the outbound call; a failed transfer reverts this too.
        proposal.status = ProposalStatus::Executed;
        self.proposals(proposal_id).set(&proposal);

        let ledger = self.governance_token().get();
        self.tx()
            .to(&ledger)
            .typed(token_ledger_proxy::TokenLedgerProxy)
            .transfer(&proposal.recipient, &proposal.amount)
            .sync_call();

        self.proposal_executed_event(proposal_id);
    }

    // ========================================================
    // ENDPOINT: rejectProposal
    // Anyone can record the verdict of a proposal that did not pass.
    // ========================================================

    #[endpoint(rejectProposal)]
    fn reject_proposal(&self, proposal_id: u64) {
        require!(
            !self.proposals(proposal_id).is_empty(),
            "Proposal does not exist"
        );

        let mut proposal = self.proposals(proposal_id).get();
        require!(
            !proposal.status.is_terminal(),
            "Proposal already resolved"
        );

        let now = self.blockchain().get_block_timestamp();
        require!(
            now >= proposal.voting_ends_at(VOTING_PERIOD),
            "Voting period not ended"
        );
        require!(!proposal.has_passed(), "Proposal passed");

        proposal.status = ProposalStatus::Rejected;
        self.proposals(proposal_id).set(&proposal);

        self.proposal_rejected_event(proposal_id);
    }

    // ========================================================
    // INTERNAL: ledger reads
    // ========================================================

    /// Plain sync call against the ledger's `balanceOf` view.
    fn ledger_balance_of(&self, account: &ManagedAddress) -> BigUint {
        let ledger = self.governance_token().get();
        self.tx()
            .to(&ledger)
            .typed(token_ledger_proxy::TokenLedgerProxy)
            .balance_of(account)
            .returns(ReturnsResult)
            .sync_call()
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(votingPeriod)]
    fn voting_period(&self) -> u64 {
        VOTING_PERIOD
    }

    /// Minimum ledger balance, in the token's smallest unit, to open a proposal.
    #[view(minProposalBalance)]
    fn min_proposal_balance(&self) -> BigUint {
        BigUint::from(MIN_PROPOSAL_TOKENS) * BigUint::from(10u64).pow(TOKEN_DECIMALS)
    }

    #[view(getProposal)]
    fn get_proposal(&self, id: u64) -> Proposal<Self::Api> {
        require!(!self.proposals(id).is_empty(), "Proposal does not exist");
        self.proposals(id).get()
    }

    #[view(getProposalCount)]
    fn get_proposal_count(&self) -> u64 {
        self.proposal_count().get()
    }

    #[view(getProposals)]
    fn get_proposals(&self, from: u64, count: u64) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        if count == 0 {
            return result;
        }
        let total = self.proposal_count().get();
        if total == 0 {
            return result;
        }
        let start = if from == 0 { 1u64 } else { from };
        if start > total {
            return result;
        }
        let end = core::cmp::min(start.saturating_add(count - 1), total);

        for i in start..=end {
            if !self.proposals(i).is_empty() {
                result.push(self.proposals(i).get());
            }
        }
        result
    }

    #[view(getActiveProposals)]
    fn get_active_proposals(&self) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let total = self.proposal_count().get();
        let now = self.blockchain().get_block_timestamp();

        for i in 1..=total {
            if self.proposals(i).is_empty() {
                continue;
            }
            let proposal = self.proposals(i).get();
            if proposal.status == ProposalStatus::Pending
                && now < proposal.voting_ends_at(VOTING_PERIOD)
            {
                result.push(proposal);
            }
        }
        result
    }

    #[view(hasVoted)]
    fn has_voted(&self, proposal_id: u64, account: &ManagedAddress) -> bool {
        self.voters(proposal_id).contains(account)
    }

    #[view(getVoters)]
    fn get_voters(&self, proposal_id: u64) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for voter in self.voters(proposal_id).iter() {
            result.push(voter);
        }
        result
    }

    #[view(getContractConfig)]
    fn get_contract_config(&self) -> MultiValue2<BigUint, u64> {
        (self.min_proposal_balance(), VOTING_PERIOD).into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("ProposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] recipient: &ManagedAddress,
        #[indexed] amount: &BigUint,
        description: &ManagedBuffer,
    );

    /// `weight` is the voter's ledger balance snapshotted at vote time.
    #[event("Voted")]
    fn voted_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] support: bool,
        weight: &BigUint,
    );

    #[event("ProposalExecuted")]
    fn proposal_executed_event(&self, #[indexed] proposal_id: u64);

    #[event("ProposalRejected")]
    fn proposal_rejected_event(&self, #[indexed] proposal_id: u64);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[view(owner)]
    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(governanceToken)]
    #[storage_mapper("governanceToken")]
    fn governance_token(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Proposals ──

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[storage_mapper("voters")]
    fn voters(&self, proposal_id: u64) -> UnorderedSetMapper<ManagedAddress>;
}
