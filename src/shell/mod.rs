use std::env;

use rustyline::DefaultEditor;

mod environment;
mod executor;
mod prompt;

use crate::{
    error::ShellError,
    flags::Flags,
    path::PathResolver,
    process::{Outcome, PipelineExecutor},
};

use environment::Environment;
use executor::CommandHandler;
use prompt::PromptStyle;

pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) resolver: PathResolver,
    pub(crate) environment: Environment,
    pub(crate) prompt: PromptStyle,
    pub(crate) executor: PipelineExecutor,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;

        let environment = Environment::discover();
        let resolver = PathResolver::new(env::current_dir()?, environment.home.clone());
        let executor = PipelineExecutor::new(&flags);
        let prompt = PromptStyle::new(!flags.is_set("no-color"));

        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to exit the shell");
        })?;

        Ok(Shell {
            editor,
            resolver,
            environment,
            prompt,
            executor,
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            self.prompt.clear_screen();
        }

        loop {
            let prompt = self.prompt.render(
                &self.environment.user,
                &self.environment.host,
                &self.resolver.display(),
            );
            match self.editor.readline(&prompt) {
                Ok(line) => match self.dispatch_line(&line) {
                    Ok(Outcome::Continue) => {}
                    Ok(Outcome::Exit) => break,
                    Err(e) => {
                        if !self.flags.is_set("quiet") {
                            eprintln!("{}", self.prompt.error(&e.to_string()));
                        }
                    }
                },
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    // End-of-input behaves like a typed `exit`.
                    println!("exit");
                    break;
                }
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("{}", self.prompt.error(&e.to_string()));
                    }
                    continue;
                }
            }
        }
        Ok(())
    }
}
