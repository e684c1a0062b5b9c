use soroban_sdk::{token, Address, Env, String};

use crate::{
    contract::{ZikAvatar, ZikAvatarClient},
    storage::Payment,
};

pub const BASE_URI: &str = "https://ipfs.zikjob.com/";
// 0.01 of the native token and 25 stable tokens, both with 7 decimals
pub const NATIVE_PRICE: i128 = 100_000;
pub const PRICE: i128 = 25_0000000;
pub const MAX_SUPPLY: u32 = 5_000;

pub fn deploy_token_contract<'a>(
    env: &Env,
    admin: &Address,
) -> (token::Client<'a>, token::StellarAssetClient<'a>) {
    let address = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();

    (
        token::Client::new(env, &address),
        token::StellarAssetClient::new(env, &address),
    )
}

pub fn deploy_avatar_contract<'a>(
    env: &Env,
    admin: &Address,
    native_token: &Address,
    payment_token: &Address,
) -> ZikAvatarClient<'a> {
    ZikAvatarClient::new(
        env,
        &env.register(
            ZikAvatar,
            (
                admin,
                Payment {
                    token: native_token.clone(),
                    price: NATIVE_PRICE,
                },
                Payment {
                    token: payment_token.clone(),
                    price: PRICE,
                },
                String::from_str(env, BASE_URI),
                MAX_SUPPLY,
            ),
        ),
    )
}
