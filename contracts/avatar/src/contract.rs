use soroban_sdk::{
    contract, contractimpl, contractmeta, log, token, Address, Env, String, Vec,
};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};
use zik::{validate_int_parameters, Attributes};

use crate::{
    error::ContractError,
    storage::{
        get_admin, get_attributes, get_balance, get_config, get_current_round, get_owner,
        get_round_requesters, get_round_size, get_round_tokens, get_total_supply,
        is_approved_for_all, is_round_generated, is_team_minted, save_admin, save_approval,
        save_attributes, save_balance, save_config, save_current_round, save_owner,
        save_round_requesters, save_round_size, save_round_tokens, save_total_supply,
        set_round_generated, set_team_minted, Config, Currency, Payment,
    },
    FEE_REDUCTION_RANGE, MAX_BASE_URI_LEN, MAX_ROUND_SIZE, PROFIT_RANGE, TEAM_RESERVE,
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Zikkie Avatar collection used as staking collateral"
);

const URI_BUFFER_LEN: usize = 256;

#[contract]
pub struct ZikAvatar;

pub trait ZikAvatarTrait {
    fn __constructor(
        env: Env,
        admin: Address,
        native: Payment,
        stable: Payment,
        base_uri: String,
        max_supply: u32,
    );

    // Mints `quantity` avatars paid in `currency`
    fn mint_avatar(
        env: Env,
        sender: Address,
        quantity: u32,
        currency: Currency,
    ) -> Result<Vec<u32>, ContractError>;

    fn mint_team_reserve(env: Env, sender: Address) -> Result<Vec<u32>, ContractError>;

    fn transfer(env: Env, from: Address, to: Address, token_id: u32) -> Result<(), ContractError>;

    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u32,
    ) -> Result<(), ContractError>;

    fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool);

    // Opens a new attribute round; enrolments of the previous round are left behind
    fn create_new_round(env: Env, sender: Address) -> Result<u32, ContractError>;

    // Replaces the sender's enrolment in the current round with `token_ids`
    fn add_to_round(env: Env, sender: Address, token_ids: Vec<u32>) -> Result<(), ContractError>;

    fn remove_from_round(env: Env, sender: Address) -> Result<(), ContractError>;

    // Assigns attributes to every unit enrolled in the current round
    fn generate_attributes(env: Env, sender: Address) -> Result<u32, ContractError>;

    fn withdraw_payments(
        env: Env,
        sender: Address,
        currency: Currency,
    ) -> Result<i128, ContractError>;

    // QUERIES

    fn owner_of(env: Env, token_id: u32) -> Result<Address, ContractError>;

    fn balance_of(env: Env, owner: Address) -> u32;

    fn query_is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool;

    fn query_attributes(env: Env, token_id: u32) -> Attributes;

    fn token_uri(env: Env, token_id: u32) -> Result<String, ContractError>;

    fn query_total_supply(env: Env) -> u32;

    fn query_metadata(env: Env) -> TokenMetadata;

    fn query_config(env: Env) -> Config;

    fn query_admin(env: Env) -> Address;

    fn query_current_round(env: Env) -> u32;

    fn query_round_requesters(env: Env, round: u32) -> Vec<Address>;

    fn query_round_tokens(env: Env, round: u32, requester: Address) -> Vec<u32>;
}

#[contractimpl]
impl ZikAvatarTrait for ZikAvatar {
    fn __constructor(
        env: Env,
        admin: Address,
        native: Payment,
        stable: Payment,
        base_uri: String,
        max_supply: u32,
    ) {
        validate_int_parameters!(native.price, stable.price, max_supply);

        if base_uri.len() > MAX_BASE_URI_LEN {
            log!(&env, "Avatar: Initialize: base uri longer than allowed");
            panic!("Avatar: Initialize: base uri can not be longer than 200 bytes");
        }

        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: 0,
            name: String::from_str(&env, "Zikkie Avatar"),
            symbol: String::from_str(&env, "ZJSA"),
        });

        save_config(
            &env,
            &Config {
                native,
                stable,
                base_uri,
                max_supply,
            },
        );
        save_admin(&env, &admin);
        save_total_supply(&env, 0);

        env.events()
            .publish(("initialize", "Zikkie Avatar collection"), admin);
    }

    fn mint_avatar(
        env: Env,
        sender: Address,
        quantity: u32,
        currency: Currency,
    ) -> Result<Vec<u32>, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let payment = config.payment(currency);
        let cost = payment
            .price
            .checked_mul(quantity as i128)
            .ok_or(ContractError::ContractMathError)?;

        let minted = mint(&env, &config, &sender, quantity)?;

        token::Client::new(&env, &payment.token).transfer(
            &sender,
            &env.current_contract_address(),
            &cost,
        );

        env.events().publish(("mint_avatar", "minter"), &sender);
        env.events().publish(("mint_avatar", "quantity"), quantity);
        env.events().publish(("mint_avatar", "currency"), currency);

        Ok(minted)
    }

    fn mint_team_reserve(env: Env, sender: Address) -> Result<Vec<u32>, ContractError> {
        sender.require_auth();
        check_admin(&env, &sender)?;

        if is_team_minted(&env) {
            log!(&env, "Avatar: Mint team reserve: reserve has already been minted");
            return Err(ContractError::TeamAlreadyMinted);
        }

        let minted = mint(&env, &get_config(&env), &sender, TEAM_RESERVE)?;
        set_team_minted(&env);

        env.events()
            .publish(("mint_team_reserve", "quantity"), TEAM_RESERVE);

        Ok(minted)
    }

    fn transfer(env: Env, from: Address, to: Address, token_id: u32) -> Result<(), ContractError> {
        from.require_auth();

        move_token(&env, &from, &to, token_id)
    }

    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u32,
    ) -> Result<(), ContractError> {
        spender.require_auth();

        if spender != from && !is_approved_for_all(&env, &from, &spender) {
            log!(
                &env,
                "Avatar: Transfer from: spender is not an approved operator of the owner"
            );
            return Err(ContractError::NotApproved);
        }

        move_token(&env, &from, &to, token_id)
    }

    fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();

        save_approval(&env, &owner, &operator, approved);

        env.events()
            .publish(("set_approval_for_all", "owner"), &owner);
        env.events()
            .publish(("set_approval_for_all", "operator"), (operator, approved));
    }

    fn create_new_round(env: Env, sender: Address) -> Result<u32, ContractError> {
        sender.require_auth();
        check_admin(&env, &sender)?;

        let round = get_current_round(&env)
            .checked_add(1)
            .ok_or(ContractError::ContractMathError)?;
        save_current_round(&env, round);

        env.events().publish(("create_new_round", "round"), round);

        Ok(round)
    }

    fn add_to_round(env: Env, sender: Address, token_ids: Vec<u32>) -> Result<(), ContractError> {
        sender.require_auth();

        if token_ids.is_empty() {
            log!(&env, "Avatar: Add to round: no token ids provided");
            return Err(ContractError::EmptyTokenList);
        }

        let round = open_round(&env)?;

        let mut enrolled: Vec<u32> = Vec::new(&env);
        for token_id in token_ids.iter() {
            if enrolled.contains(token_id) {
                continue;
            }
            if get_owner(&env, token_id) != Some(sender.clone()) {
                log!(
                    &env,
                    "Avatar: Add to round: token {} is not owned by the sender",
                    token_id
                );
                return Err(ContractError::NotTokenOwner);
            }
            if get_attributes(&env, token_id).is_generated() {
                log!(
                    &env,
                    "Avatar: Add to round: token {} already has attributes",
                    token_id
                );
                return Err(ContractError::AttributesAlreadyGenerated);
            }
            enrolled.push_back(token_id);
        }

        let previous = get_round_tokens(&env, round, &sender);
        let size = get_round_size(&env, round) - previous.len() + enrolled.len();
        if size > MAX_ROUND_SIZE {
            log!(
                &env,
                "Avatar: Add to round: round would hold {} tokens, limit is {}",
                size,
                MAX_ROUND_SIZE
            );
            return Err(ContractError::RoundFull);
        }

        if previous.is_empty() {
            let mut requesters = get_round_requesters(&env, round);
            requesters.push_back(sender.clone());
            save_round_requesters(&env, round, &requesters);
        }
        save_round_tokens(&env, round, &sender, &enrolled);
        save_round_size(&env, round, size);

        env.events().publish(("add_to_round", "requester"), &sender);
        env.events().publish(("add_to_round", "tokens"), enrolled.len());

        Ok(())
    }

    fn remove_from_round(env: Env, sender: Address) -> Result<(), ContractError> {
        sender.require_auth();

        let round = open_round(&env)?;

        let previous = get_round_tokens(&env, round, &sender);
        if previous.is_empty() {
            return Ok(());
        }

        let mut requesters = get_round_requesters(&env, round);
        if let Some(index) = requesters.first_index_of(&sender) {
            requesters.remove(index);
        }
        save_round_requesters(&env, round, &requesters);
        save_round_tokens(&env, round, &sender, &Vec::new(&env));
        save_round_size(&env, round, get_round_size(&env, round) - previous.len());

        env.events()
            .publish(("remove_from_round", "requester"), &sender);

        Ok(())
    }

    fn generate_attributes(env: Env, sender: Address) -> Result<u32, ContractError> {
        sender.require_auth();
        check_admin(&env, &sender)?;

        let round = open_round(&env)?;

        let mut generated = 0u32;
        for requester in get_round_requesters(&env, round).iter() {
            for token_id in get_round_tokens(&env, round, &requester).iter() {
                if get_attributes(&env, token_id).is_generated() {
                    continue;
                }
                let attributes = Attributes {
                    profit: env
                        .prng()
                        .gen_range::<u64>(PROFIT_RANGE.0..=PROFIT_RANGE.1)
                        as u32,
                    fee_reduction: env
                        .prng()
                        .gen_range::<u64>(FEE_REDUCTION_RANGE.0..=FEE_REDUCTION_RANGE.1)
                        as u32,
                };
                save_attributes(&env, token_id, &attributes);
                generated += 1;
            }
        }
        set_round_generated(&env, round);

        env.events()
            .publish(("generate_attributes", "round"), round);
        env.events()
            .publish(("generate_attributes", "tokens"), generated);

        Ok(generated)
    }

    fn withdraw_payments(
        env: Env,
        sender: Address,
        currency: Currency,
    ) -> Result<i128, ContractError> {
        sender.require_auth();
        check_admin(&env, &sender)?;

        let config = get_config(&env);
        let payment_token = token::Client::new(&env, &config.payment(currency).token);
        let amount = payment_token.balance(&env.current_contract_address());
        if amount == 0 {
            log!(&env, "Avatar: Withdraw payments: nothing collected in this currency");
            return Err(ContractError::NothingToWithdraw);
        }

        payment_token.transfer(&env.current_contract_address(), &sender, &amount);

        env.events()
            .publish(("withdraw_payments", "currency"), currency);
        env.events()
            .publish(("withdraw_payments", "amount"), amount);

        Ok(amount)
    }

    // QUERIES

    fn owner_of(env: Env, token_id: u32) -> Result<Address, ContractError> {
        get_owner(&env, token_id).ok_or(ContractError::TokenNotFound)
    }

    fn balance_of(env: Env, owner: Address) -> u32 {
        get_balance(&env, &owner)
    }

    fn query_is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        is_approved_for_all(&env, &owner, &operator)
    }

    fn query_attributes(env: Env, token_id: u32) -> Attributes {
        get_attributes(&env, token_id)
    }

    fn token_uri(env: Env, token_id: u32) -> Result<String, ContractError> {
        if get_owner(&env, token_id).is_none() {
            return Err(ContractError::TokenNotFound);
        }

        let base_uri = get_config(&env).base_uri;
        let base_len = base_uri.len() as usize;

        let mut buffer = [0u8; URI_BUFFER_LEN];
        base_uri.copy_into_slice(&mut buffer[..base_len]);
        let written = write_decimal(&mut buffer[base_len..], token_id);

        Ok(String::from_bytes(&env, &buffer[..base_len + written]))
    }

    fn query_total_supply(env: Env) -> u32 {
        get_total_supply(&env)
    }

    fn query_metadata(env: Env) -> TokenMetadata {
        TokenUtils::new(&env).metadata().get_metadata()
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }

    fn query_current_round(env: Env) -> u32 {
        get_current_round(&env)
    }

    fn query_round_requesters(env: Env, round: u32) -> Vec<Address> {
        get_round_requesters(&env, round)
    }

    fn query_round_tokens(env: Env, round: u32, requester: Address) -> Vec<u32> {
        get_round_tokens(&env, round, &requester)
    }
}

fn check_admin(env: &Env, sender: &Address) -> Result<(), ContractError> {
    if get_admin(env) != *sender {
        log!(env, "Avatar: sender is not the admin");
        return Err(ContractError::Unauthorized);
    }

    Ok(())
}

// Current round if it is still accepting enrolments
fn open_round(env: &Env) -> Result<u32, ContractError> {
    let round = get_current_round(env);
    if round == 0 {
        log!(env, "Avatar: no attribute round has been opened");
        return Err(ContractError::NoActiveRound);
    }
    if is_round_generated(env, round) {
        log!(env, "Avatar: attributes of round {} are already generated", round);
        return Err(ContractError::RoundAlreadyGenerated);
    }

    Ok(round)
}

fn mint(
    env: &Env,
    config: &Config,
    to: &Address,
    quantity: u32,
) -> Result<Vec<u32>, ContractError> {
    if quantity == 0 {
        log!(env, "Avatar: Mint: quantity must be bigger than 0");
        return Err(ContractError::InvalidQuantity);
    }

    let total_supply = get_total_supply(env);
    let new_supply = total_supply
        .checked_add(quantity)
        .ok_or(ContractError::ContractMathError)?;
    if new_supply > config.max_supply {
        log!(
            env,
            "Avatar: Mint: minting {} would exceed the max supply of {}",
            quantity,
            config.max_supply
        );
        return Err(ContractError::MaxSupplyReached);
    }

    let mut minted = Vec::new(env);
    for token_id in total_supply..new_supply {
        save_owner(env, token_id, to);
        minted.push_back(token_id);
    }
    save_balance(env, to, get_balance(env, to) + quantity);
    save_total_supply(env, new_supply);

    Ok(minted)
}

fn move_token(env: &Env, from: &Address, to: &Address, token_id: u32) -> Result<(), ContractError> {
    let owner = get_owner(env, token_id).ok_or_else(|| {
        log!(env, "Avatar: Transfer: token {} does not exist", token_id);
        ContractError::TokenNotFound
    })?;
    if owner != *from {
        log!(env, "Avatar: Transfer: token {} is not owned by sender", token_id);
        return Err(ContractError::NotTokenOwner);
    }

    if from != to {
        save_owner(env, token_id, to);
        save_balance(env, from, get_balance(env, from) - 1);
        save_balance(env, to, get_balance(env, to) + 1);
    }

    env.events().publish(("transfer", "from"), from);
    env.events().publish(("transfer", "to"), to);
    env.events().publish(("transfer", "token_id"), token_id);

    Ok(())
}

// Writes `value` in base 10 at the start of `buffer`, returns the number of bytes used
fn write_decimal(buffer: &mut [u8], mut value: u32) -> usize {
    let mut digits = [0u8; 10];
    let mut len = 0;
    loop {
        digits[len] = b'0' + (value % 10) as u8;
        len += 1;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    for (slot, digit) in buffer.iter_mut().zip(digits[..len].iter().rev()) {
        *slot = *digit;
    }

    len
}
