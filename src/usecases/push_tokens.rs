use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::models::push_tokens::{PushToken, RegisterPushTokenArgs};
use crate::repositories::push_tokens;

const TOKEN_PREFIXES: [&str; 2] = ["ExponentPushToken[", "ExpoPushToken["];

/// The platform issues tokens shaped `ExponentPushToken[xxxx]` (older
/// clients: `ExpoPushToken[xxxx]`).
pub fn is_valid_push_token(token: &str) -> bool {
    TOKEN_PREFIXES.iter().any(|prefix| {
        token
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(']'))
            .is_some_and(|body| !body.is_empty() && !body.contains(['[', ']']))
    })
}

pub async fn register<C: Context>(
    ctx: &C,
    caller_id: i64,
    args: &RegisterPushTokenArgs,
) -> ServiceResult<PushToken> {
    if args.user_id != caller_id {
        return Err(AppError::PushTokensUnauthorized);
    }
    if !is_valid_push_token(&args.push_token) {
        return Err(AppError::PushTokensInvalidFormat);
    }
    let token = push_tokens::upsert(ctx, args.user_id, &args.push_token, args.user_type).await?;
    Ok(PushToken::from(token))
}

pub async fn fetch_all<C: Context>(ctx: &C, user_id: i64) -> ServiceResult<Vec<PushToken>> {
    let tokens = push_tokens::fetch_for_user(ctx, user_id).await?;
    Ok(tokens.into_iter().map(PushToken::from).collect())
}

/// Owner-scoped delete. A token id that does not exist under the caller
/// affects zero rows and still reports success, so callers cannot probe for
/// other users' tokens.
pub async fn delete<C: Context>(ctx: &C, token_id: i64, user_id: i64) -> ServiceResult<()> {
    push_tokens::delete(ctx, token_id, user_id).await?;
    Ok(())
}
