use crate::entry::parse_timestamp;
use chrono::NaiveDateTime;
use clap::{value_t, App, AppSettings, Arg, ArgMatches, ErrorKind, SubCommand};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "dados_financeiros.json";

#[derive(Debug, PartialEq)]
pub enum Command {
    Add {
        kind: String,
        description: String,
        amount: f64,
        timestamp: Option<NaiveDateTime>,
    },
    List,
    Summary,
    Clear,
    Export,
}

#[derive(Debug, PartialEq)]
pub struct Args {
    pub data_file: PathBuf,
    pub verbose: bool,
    pub command: Command,
}

impl Args {
    /// Parses the process arguments, printing usage and exiting on error.
    pub fn parse() -> Self {
        match Self::try_parse_from(std::env::args_os()) {
            Ok(args) => args,
            Err(err) => err.exit(),
        }
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(itr)?;

        let command = match matches.subcommand() {
            ("adicionar", Some(sub)) => parse_add(sub)?,
            ("listar", _) => Command::List,
            ("resumo", _) => Command::Summary,
            ("limpar", _) => Command::Clear,
            ("exportar", _) => Command::Export,
            // SubcommandRequiredElseHelp keeps us from getting here.
            _ => {
                return Err(clap::Error::with_description(
                    "a subcommand is required",
                    ErrorKind::MissingSubcommand,
                ))
            }
        };

        // Global flags given after the subcommand only show up in the
        // subcommand's matches.
        let sub = matches.subcommand().1;
        let file_matches = sub
            .filter(|sub| sub.occurrences_of("arquivo") > 0)
            .unwrap_or(&matches);

        Ok(Self {
            data_file: PathBuf::from(
                file_matches
                    .value_of_os("arquivo")
                    .unwrap_or_else(|| OsStr::new(DEFAULT_DATA_FILE)),
            ),
            verbose: matches.is_present("verbose")
                || sub.map_or(false, |sub| sub.is_present("verbose")),
            command,
        })
    }
}

fn parse_add(matches: &ArgMatches) -> Result<Command, clap::Error> {
    let amount = value_t!(matches, "valor", f64)?;
    let timestamp = match matches.value_of("data") {
        Some(raw) => Some(parse_timestamp(raw).map_err(|err| {
            clap::Error::with_description(
                &format!(
                    "invalid timestamp '{}': {} (expected YYYY-MM-DDTHH:MM:SS)",
                    raw, err
                ),
                ErrorKind::InvalidValue,
            )
        })?),
        None => None,
    };

    Ok(Command::Add {
        kind: matches.value_of("tipo").unwrap_or_default().to_string(),
        description: matches.value_of("descricao").unwrap_or_default().to_string(),
        amount,
        timestamp,
    })
}

fn app() -> App<'static, 'static> {
    App::new("financas")
        .version("0.1.0")
        .about("Controle simples de entradas e saídas financeiras.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("arquivo")
                .long("arquivo")
                .takes_value(true)
                .global(true)
                .env("FINANCAS_ARQUIVO")
                .default_value(DEFAULT_DATA_FILE)
                .help("Caminho para o arquivo JSON onde as transações serão salvas."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .global(true)
                .help("Exibe mensagens de diagnóstico."),
        )
        .subcommand(
            SubCommand::with_name("adicionar")
                .about("Registra uma nova transação de entrada ou saída.")
                .setting(AppSettings::AllowNegativeNumbers)
                .arg(
                    Arg::with_name("tipo")
                        .required(true)
                        .possible_values(&["entrada", "saida"])
                        .case_insensitive(true)
                        .help("Tipo da transação: entrada ou saída de recursos."),
                )
                .arg(
                    Arg::with_name("descricao")
                        .required(true)
                        .help("Descrição breve da transação."),
                )
                .arg(
                    Arg::with_name("valor")
                        .required(true)
                        .help("Valor numérico da transação (use ponto como separador decimal)."),
                )
                .arg(
                    Arg::with_name("data")
                        .long("data")
                        .takes_value(true)
                        .help("Data e hora da transação (AAAA-MM-DDTHH:MM:SS). Padrão: agora."),
                ),
        )
        .subcommand(SubCommand::with_name("listar").about("Lista todas as transações registradas."))
        .subcommand(
            SubCommand::with_name("resumo")
                .about("Mostra o total de entradas, saídas e o saldo atual."),
        )
        .subcommand(SubCommand::with_name("limpar").about("Remove todas as transações registradas."))
        .subcommand(
            SubCommand::with_name("exportar").about("Exporta as transações em formato CSV."),
        )
}
