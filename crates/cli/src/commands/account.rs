use storefront_client::api::auth::{OtpPurpose, RegisterRequest};
use storefront_client::{ApiClient, ApiError};

use super::json;
use crate::cli::{LoginArgs, RegisterArgs};
use crate::output::Output;

/// Password login for admins; customers get an OTP round trip.
pub async fn login(client: &ApiClient, args: LoginArgs) -> Result<Output, ApiError> {
    let auth = client.auth();

    let token = match args.otp {
        Some(otp) => auth.login_otp(&args.email, &otp).await?,
        None => {
            let password = args
                .password
                .ok_or_else(|| ApiError::InvalidRequest("--password is required without --otp".to_string()))?;
            let pre = auth.pre_login(&args.email, &password).await?;
            if pre.require_otp {
                let sent = auth.send_otp(&pre.email, OtpPurpose::Login).await?;
                return Ok(Output::Message(format!(
                    "{} Re-run with --otp <code> within {} minutes.",
                    sent.message,
                    sent.expires_in.div_ceil(60)
                )));
            }
            auth.login(&args.email, &password).await?
        }
    };

    Ok(Output::Message(format!("Signed in as {}", token.user.display_name())))
}

/// Registration is gated on a verified email: first call sends the code,
/// second call (with `--otp`) verifies it and creates the account.
pub async fn register(client: &ApiClient, args: RegisterArgs) -> Result<Output, ApiError> {
    let auth = client.auth();

    let Some(otp) = args.otp else {
        let sent = auth.send_otp(&args.email, OtpPurpose::Register).await?;
        return Ok(Output::Message(format!("{} Re-run with --otp <code> to finish.", sent.message)));
    };

    let verified = auth.verify_otp(&args.email, &otp, OtpPurpose::Register).await?;
    if !verified.verified {
        return Ok(Output::Message(verified.message));
    }

    let req = RegisterRequest {
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        phone: args.phone,
    };
    let token = auth.register(&req).await?;
    Ok(Output::Message(format!("Welcome, {}", token.user.display_name())))
}

pub async fn logout(client: &ApiClient) -> Result<Output, ApiError> {
    client.auth().logout().await?;
    Ok(Output::Message("Signed out".to_string()))
}

pub async fn whoami(client: &ApiClient) -> Result<Output, ApiError> {
    if !client.session().is_authenticated().await {
        return Ok(Output::Message("Not signed in".to_string()));
    }
    json(&client.auth().me().await?)
}

pub async fn refresh(client: &ApiClient) -> Result<Output, ApiError> {
    let token = client.auth().refresh().await?;
    Ok(Output::Message(format!("Token refreshed for {}", token.user.email)))
}
