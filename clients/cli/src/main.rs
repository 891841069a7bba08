mod download;
mod greet;

use cli_rs::cli_error::CliError;
use cli_rs::command::Command;
use cli_rs::parser::Cmd;
use drive_mirror::MirrorErr;

fn main() {
    // a missing .env is fine, the variables may already be exported
    dotenv::dotenv().ok();

    Command::name("drive-mirror")
        .description("Mirror a shared Google Drive folder into ./data")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            Command::name("hello-world")
                .description("greet the world")
                .handler(greet::hello_world),
        )
        .subcommand(
            Command::name("download-data")
                .description("download every file of the shared folder, converting Docs, Sheets and Slides to .docx, .xlsx and .pptx")
                .handler(download::download_data),
        )
        .parse();
}

fn mirror_err(err: MirrorErr) -> CliError {
    CliError::from(err.to_string())
}
