use std::{io::BufRead, sync::Arc};

use crate::{
    credential::Credential,
    strategy::{
        HashingAlgorithm, HashingStrategy, argon2::Argon2Params, bcrypt::BcryptParams,
        pbkdf2::Pbkdf2Params, spawn_hash,
    },
    types::{Factor, Password, PasswordHash, Salt},
};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::{
    Result,
    eyre::{bail, ensure},
};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct HashplugArgs {
    /// The hashing algorithm to use, with its recommended parameters.
    #[arg(short('a'), long, value_enum, global = true, default_value_t = Default::default())]
    pub algorithm: AlgorithmName,
    #[command(subcommand)]
    pub command: HashplugCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HashplugCommand {
    /// Display the default factor and the supported factor range of every algorithm.
    Info {},
    /// Generate a fresh salt.
    Salt {},
    /// Check whether a salt is accepted by the algorithm.
    ValidateSalt { salt: String },
    /// Hash a password read from standard input.
    Hash {
        /// The salt to hash with. A fresh salt is generated if omitted.
        #[arg(short('s'), long)]
        salt: Option<String>,
        /// The work factor. The algorithm's default is used if omitted.
        #[arg(short('f'), long)]
        factor: Option<u32>,
    },
    /// Verify a password read from standard input against a stored credential.
    Verify {
        #[arg(short('s'), long)]
        salt: String,
        #[arg(short('f'), long)]
        factor: u32,
        #[arg(long)]
        hash: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Default, Debug)]
pub enum AlgorithmName {
    /// Argon2id, 19 MiB of memory, factor is the iteration count.
    #[default]
    Argon2,
    /// PBKDF2-HMAC-SHA256, factor is the iteration count.
    Pbkdf2,
    /// bcrypt, factor is the cost exponent.
    Bcrypt,
}

impl AlgorithmName {
    pub fn algorithm(&self) -> HashingAlgorithm {
        match self {
            AlgorithmName::Argon2 => HashingAlgorithm::Argon2(Argon2Params::default()),
            AlgorithmName::Pbkdf2 => HashingAlgorithm::Pbkdf2(Pbkdf2Params::default()),
            AlgorithmName::Bcrypt => HashingAlgorithm::Bcrypt(BcryptParams::default()),
        }
    }
}

/// Reads a single line, without its line terminator.
fn read_password(mut input: impl BufRead) -> Result<Password> {
    let mut line = String::new();

    ensure!(
        input.read_line(&mut line)? > 0,
        "No password provided on standard input"
    );

    if line.ends_with('\n') {
        line.pop();

        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(Password::from(line))
}

impl HashplugArgs {
    pub async fn process(self) -> Result<()> {
        let algorithm = Arc::new(self.algorithm.algorithm());

        match self.command {
            HashplugCommand::Info {} => {
                for name in AlgorithmName::value_variants() {
                    let algorithm = name.algorithm();
                    let range = algorithm.factor_range();

                    println!(
                        "{name:?}: {display_name}, default factor {default_factor}, factor range {min}..={max}",
                        display_name = algorithm.display_name().unwrap_or("-"),
                        default_factor = algorithm.default_factor(),
                        min = range.start(),
                        max = range.end(),
                    );
                }
            }
            HashplugCommand::Salt {} => {
                println!("{}", algorithm.generate_salt());
            }
            HashplugCommand::ValidateSalt { salt } => {
                if !algorithm.validate_salt(&salt) {
                    bail!("Salt is not valid for {:?}", self.algorithm);
                }

                println!("valid");
            }
            HashplugCommand::Hash { salt, factor } => {
                let password = read_password(std::io::stdin().lock())?;
                let salt = match salt {
                    Some(salt) => Salt::from(salt),
                    None => algorithm.generate_salt(),
                };
                let factor = factor.map_or_else(|| algorithm.default_factor(), Factor);
                let hash = spawn_hash(algorithm, password, salt.clone(), factor).await?;

                println!("salt: {salt}");
                println!("factor: {factor}");
                println!("hash: {hash}");
            }
            HashplugCommand::Verify { salt, factor, hash } => {
                let password = read_password(std::io::stdin().lock())?;
                let credential = Credential {
                    salt: Salt::from(salt),
                    factor: Factor(factor),
                    hash: PasswordHash::from(hash),
                };

                if !credential.verify_async(algorithm, password).await? {
                    bail!("Password does not match");
                }

                println!("match");
            }
        }

        Ok(())
    }
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    HashplugArgs::command().debug_assert();
}

#[test]
fn password_line_terminator_is_stripped() {
    for (input, expected) in [
        ("Str0ngP@ss!\n", "Str0ngP@ss!"),
        ("Str0ngP@ss!\r\n", "Str0ngP@ss!"),
        ("Str0ngP@ss!", "Str0ngP@ss!"),
        (" spaced \n", " spaced "),
        ("\n", ""),
    ] {
        let password = read_password(input.as_bytes()).unwrap();

        assert_eq!(password.as_bytes(), expected.as_bytes());
    }

    assert!(read_password("".as_bytes()).is_err());
}
