use clap::Args;
use storefront_app::{
    database::Db,
    domain::{
        profiles::{PgProfilesService, ProfilesService, records::ProfileRecord},
        users::{PgUsersService, UsersService, data::NewUser, token::generate_token},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[arg(long)]
    username: String,

    /// Optional raw API token; generated when omitted
    #[arg(long)]
    token: Option<String>,

    /// Shipping address; creates the profile when given
    #[arg(long, requires_all = ["city", "state", "zip"])]
    address: Option<String>,

    #[arg(long, requires = "address")]
    city: Option<String>,

    #[arg(long, requires = "address")]
    state: Option<String>,

    #[arg(long, requires = "address")]
    zip: Option<String>,
}

pub(crate) async fn run(db: &Db, args: CreateUserArgs) -> Result<(), String> {
    let users = PgUsersService::new(db.clone());
    let raw_token = args.token.unwrap_or_else(generate_token);

    if raw_token.trim().is_empty() {
        return Err("token cannot be empty".to_string());
    }

    let user = users
        .create_user(NewUser {
            username: args.username,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    users
        .issue_token(user.id, &raw_token)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);

    if let (Some(address), Some(city), Some(state), Some(zip)) =
        (args.address, args.city, args.state, args.zip)
    {
        let profile = PgProfilesService::new(db.clone())
            .create_profile(ProfileRecord {
                user_id: user.id,
                address,
                city,
                state,
                zip,
            })
            .await
            .map_err(|error| format!("failed to create profile: {error}"))?;

        println!(
            "profile: {}, {}, {} {}",
            profile.address, profile.city, profile.state, profile.zip
        );
    }

    println!("api_token: {raw_token}");
    println!("store this token now; it is only shown once");

    Ok(())
}
