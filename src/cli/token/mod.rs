//! Token command - issue a bearer token for calling the API locally

use clap::Args;

use crate::domain::Identity;

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Subject of the token
    #[arg(long)]
    pub user_id: String,

    #[arg(long)]
    pub username: Option<String>,
}

impl TokenArgs {
    fn identity(&self) -> Identity {
        let identity = Identity::new(&self.user_id);
        match &self.username {
            Some(username) => identity.with_username(username),
            None => identity,
        }
    }
}

/// Print a signed token for the configured secret or JWKS key
pub fn run(args: TokenArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let issuer = crate::create_token_issuer(&config.auth)?;
    let token = issuer.issue(&args.identity())?;

    println!("{}", token);
    eprintln!("Token expires in {} hours", issuer.expiration_hours());

    Ok(())
}
