//! Newsletter sign-up.

use anyhow::{bail, Result};
use luxe_commerce::newsletter::{self, INVALID_EMAIL_MESSAGE, SUBSCRIBED_MESSAGE};

use super::SubscribeArgs;
use crate::context::Context;

/// Run the subscribe command.
pub async fn run(args: SubscribeArgs, ctx: &Context) -> Result<()> {
    match newsletter::subscribe(&args.email) {
        Ok(email) => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "subscribed": email }));
            } else {
                ctx.output.success(SUBSCRIBED_MESSAGE);
            }
            Ok(())
        }
        Err(e) => {
            ctx.output.debug(&format!("Rejected {:?}: {}", args.email, e));
            bail!(INVALID_EMAIL_MESSAGE)
        }
    }
}
