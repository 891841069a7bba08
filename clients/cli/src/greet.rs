use cli_rs::cli_error::CliResult;

pub fn greeting() -> &'static str {
    "Hello, world!"
}

pub fn hello_world() -> CliResult<()> {
    println!("{}", greeting());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn greets_the_world() {
        assert_eq!(super::greeting(), "Hello, world!");
    }
}
