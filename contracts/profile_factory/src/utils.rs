use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

/// Deploys a profile owned by `owner`. The salt only depends on the owner, so the
/// profile address is deterministic per factory and user.
pub fn deploy_profile_contract(
    env: &Env,
    profile_wasm_hash: BytesN<32>,
    owner: &Address,
) -> Address {
    let mut salt = Bytes::new(env);
    salt.append(&owner.clone().to_xdr(env));
    let salt = env.crypto().sha256(&salt).to_bytes();

    env.deployer()
        .with_current_contract(salt)
        .deploy_v2(profile_wasm_hash, (owner.clone(),))
}
