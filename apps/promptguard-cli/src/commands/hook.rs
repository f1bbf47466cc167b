// hook.rs - The UserPromptSubmit hook itself.
//
// Never fails from the host's point of view: whatever happens, stdout gets
// valid JSON and the process exits 0.

use std::io;

use promptguard_hook::run;

pub fn execute() {
    let outcome = run(io::stdin().lock());
    tracing::debug!(failed = outcome.is_failed(), "hook finished");

    let written = outcome.emit(&mut io::stdout().lock(), &mut io::stderr().lock());
    if let Err(e) = written {
        tracing::error!("could not write hook reply: {}", e);
    }
}
