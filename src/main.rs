use argh::FromArgs;
use fragletc::dispatch::DISPATCH_FAILURE;
use fragletc::{Dispatcher, ExitCode, VeinRegistry, config};

#[derive(FromArgs)]
/// Run a script through the language runtime declared by its vein.
/// The vein comes from an explicit --vein flag or from a shebang line of the
/// form "#!/usr/bin/env -S fragletc --vein=<identifier>".
struct Cli {
    /// vein to dispatch under, overriding any shebang declaration
    #[argh(option)]
    vein: Option<String>,

    /// list the registered veins and exit
    #[argh(switch)]
    list: bool,

    /// path of the script to run, followed by arguments passed through to it
    #[argh(positional, greedy)]
    script_and_args: Vec<String>,
}

fn main() {
    let cli: Cli = argh::from_env();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> ExitCode {
    let mut registry = VeinRegistry::with_builtins();
    if let Err(err) = config::apply_overrides(&mut registry) {
        eprintln!("fragletc: error: {err:#}");
        return DISPATCH_FAILURE;
    }

    if cli.list {
        for vein in registry.veins() {
            println!("{vein}");
        }
        return 0;
    }

    let Some((script, script_args)) = cli.script_and_args.split_first() else {
        eprintln!("fragletc: error: missing script path (run with --help for usage)");
        return DISPATCH_FAILURE;
    };

    match Dispatcher::new(&registry).run(script, cli.vein.as_deref(), script_args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("fragletc: error: {err}");
            DISPATCH_FAILURE
        }
    }
}
