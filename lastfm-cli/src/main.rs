mod session;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lastfm_api::types::Scrobble;
use lastfm_api::{Credentials, LastfmClient, LastfmError, Params};
use tracing_subscriber::EnvFilter;

use crate::session::SavedSession;

#[derive(Parser)]
#[command(name = "lastfm", version, about = "Last.fm web service CLI")]
struct Cli {
    /// Application API key
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Application shared secret (needed for login and write methods)
    #[arg(long, env = "LASTFM_API_SECRET", hide_env_values = true)]
    api_secret: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the URL where a user authorizes this application
    AuthUrl {
        /// Redirect target after authorization
        #[arg(short, long)]
        callback: Option<String>,
    },
    /// Request a desktop auth token and print its authorization URL
    Token,
    /// Exchange an authorization token for a session key and save it
    Login {
        /// Token from the authorization redirect
        #[arg(required_unless_present = "check")]
        token: Option<String>,
        /// Check current login status
        #[arg(long)]
        check: bool,
    },
    /// Clear saved session
    Logout,
    /// Call any API method and print the raw JSON response
    Call {
        /// Method name, e.g. `artist.getInfo`
        method: String,
        /// Parameters as `key=value`
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Show track details
    Info {
        artist: String,
        track: String,
    },
    /// List a user's loved tracks
    Loved {
        /// User name (defaults to the logged-in user)
        user: Option<String>,
        /// Max results
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },
    /// Love a track
    Love {
        artist: String,
        track: String,
    },
    /// Scrobble a track
    Scrobble {
        artist: String,
        track: String,
        #[arg(short, long)]
        album: Option<String>,
        /// Unix time the track started (defaults to now)
        #[arg(short, long)]
        timestamp: Option<i64>,
    },
    /// Show current user info
    Me,
}

fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = build_client(cli.api_key, cli.api_secret)?;
    let result = match cli.command {
        Command::AuthUrl { callback } => {
            println!("{}", client.login_url(callback.as_deref()));
            Ok(())
        }
        Command::Token => cmd_token(&client),
        Command::Login { token, check } => cmd_login(&client, token, check),
        Command::Logout => cmd_logout(),
        Command::Call { method, params } => cmd_call(&client, &method, params),
        Command::Info { artist, track } => cmd_info(&client, &artist, &track),
        Command::Loved { user, limit } => cmd_loved(&client, user, limit),
        Command::Love { artist, track } => cmd_love(&client, &artist, &track),
        Command::Scrobble {
            artist,
            track,
            album,
            timestamp,
        } => cmd_scrobble(&client, artist, track, album, timestamp),
        Command::Me => cmd_me(&client),
    };

    if let Err(e) = &result {
        if e.downcast_ref::<LastfmError>().is_some_and(LastfmError::is_invalid_session) {
            eprintln!("Session is no longer valid. Run `lastfm auth-url` and `lastfm login <token>` again.");
        }
    }
    result
}

fn build_client(api_key: String, api_secret: Option<String>) -> Result<LastfmClient> {
    let mut creds = Credentials::new(api_key);
    creds.api_secret = api_secret;
    creds.session_key = SavedSession::load_or_default().key;
    LastfmClient::new(creds).context("failed to create HTTP client")
}

// ── auth ──

fn cmd_token(client: &LastfmClient) -> Result<()> {
    let token = client.fetch_token()?;
    println!("Token: {token}");
    println!("Authorize at: {}&token={token}", client.login_url(None));
    println!("Then run: lastfm login {token}");
    Ok(())
}

fn cmd_login(client: &LastfmClient, token: Option<String>, check: bool) -> Result<()> {
    if check {
        let saved = SavedSession::load_or_default();
        match (saved.name, client.credentials().is_logged_in()) {
            (Some(name), true) => println!("Logged in as: {name}"),
            _ => println!("Not logged in."),
        }
        return Ok(());
    }

    let token = token.context("token required")?;
    let info = client.fetch_session(&token)?;
    println!("Logged in as: {}", info.name);
    SavedSession::from(info).save()?;
    println!("Session saved.");
    Ok(())
}

fn cmd_logout() -> Result<()> {
    SavedSession::clear()?;
    println!("Session cleared.");
    Ok(())
}

// ── generic call ──

fn cmd_call(client: &LastfmClient, method: &str, params: Vec<(String, String)>) -> Result<()> {
    let resp = client.call(method, params.into_iter().collect::<Params>())?;
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}

// ── tracks ──

fn cmd_info(client: &LastfmClient, artist: &str, track: &str) -> Result<()> {
    let saved = SavedSession::load_or_default();
    let t = client.track_info(artist, track, saved.name.as_deref())?;
    println!("Track:     {}", t.name);
    println!("Artist:    {}", t.artist);
    if let Some(album) = &t.album {
        println!("Album:     {album}");
    }
    println!(
        "Duration:  {}:{:02}",
        t.duration_ms / 60000,
        (t.duration_ms / 1000) % 60
    );
    println!("Listeners: {}", t.listeners);
    println!("Plays:     {}", t.playcount);
    if let Some(loved) = t.user_loved {
        println!("Loved:     {}", if loved { "yes" } else { "no" });
    }
    println!("URL:       {}", t.url);
    Ok(())
}

fn cmd_loved(client: &LastfmClient, user: Option<String>, limit: u32) -> Result<()> {
    let user = match user {
        Some(u) => u,
        None => SavedSession::load_or_default()
            .name
            .context("no user given and not logged in")?,
    };
    for t in client.user_loved_tracks(&user, limit)? {
        println!("  {} - {}", t.artist, t.name);
    }
    Ok(())
}

fn cmd_love(client: &LastfmClient, artist: &str, track: &str) -> Result<()> {
    client.track_love(artist, track)?;
    println!("Loved: {artist} - {track}");
    Ok(())
}

fn cmd_scrobble(
    client: &LastfmClient,
    artist: String,
    track: String,
    album: Option<String>,
    timestamp: Option<i64>,
) -> Result<()> {
    let timestamp = match timestamp {
        Some(ts) => ts,
        None => i64::try_from(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())?,
    };
    let mut scrobble = Scrobble::new(artist, track, timestamp);
    scrobble.album = album;
    let result = client.track_scrobble(&scrobble)?;
    if result.accepted == 0 {
        bail!("scrobble ignored by server");
    }
    println!("Scrobbled: {} - {}", scrobble.artist, scrobble.track);
    Ok(())
}

// ── me ──

fn cmd_me(client: &LastfmClient) -> Result<()> {
    let name = SavedSession::load_or_default()
        .name
        .context("not logged in")?;
    let profile = client.user_info(&name)?;
    println!("User:    {}", profile.name);
    if let Some(real) = &profile.real_name {
        println!("Name:    {real}");
    }
    if let Some(country) = &profile.country {
        println!("Country: {country}");
    }
    println!("Plays:   {}", profile.playcount);
    println!("URL:     {}", profile.url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_key_value_params() {
        assert_eq!(parse_param("user=rj").unwrap(), ("user".into(), "rj".into()));
        assert_eq!(parse_param("q=a=b").unwrap(), ("q".into(), "a=b".into()));
        assert!(parse_param("novalue").is_err());
    }

    #[test]
    fn call_subcommand_collects_params() {
        let cli = Cli::try_parse_from([
            "lastfm",
            "--api-key",
            "KEY1",
            "call",
            "artist.getInfo",
            "artist=Cher",
            "lang=en",
        ])
        .unwrap();
        match cli.command {
            Command::Call { method, params } => {
                assert_eq!(method, "artist.getInfo");
                assert_eq!(params.len(), 2);
            }
            _ => panic!("expected call"),
        }
    }
}
