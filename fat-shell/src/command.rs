use fat_sim::{FatFileSystem, Node};
use typed_bytesize::ByteSizeIec;

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Ls(&'a str),
    Mkdir { path: &'a str, name: &'a str },
    Touch { path: &'a str, name: &'a str, size: usize },
    Rmdir(&'a str),
    Destroy(&'a str),
    ShowFat,
    Help,
    Exit,
}

impl<'a> Command<'a> {
    /// Tokenizes one input line. Blank lines parse to `None`;
    /// unknown commands and wrong arities come back as a ready-to-print message.
    pub fn parse(line: &'a str) -> Result<Option<Self>, String> {
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return Ok(None);
        };

        let cmd = match head {
            "ls" => Self::Ls(arg(&mut tokens, "ls <path>")?),
            "mkdir" => Self::Mkdir {
                path: arg(&mut tokens, "mkdir <path> <name>")?,
                name: arg(&mut tokens, "mkdir <path> <name>")?,
            },
            "touch" => {
                const USAGE: &str = "touch <path> <name> <size>";
                let path = arg(&mut tokens, USAGE)?;
                let name = arg(&mut tokens, USAGE)?;
                let size = arg(&mut tokens, USAGE)?;
                let size = size
                    .parse()
                    .map_err(|_| format!("touch: {size:?} is not a valid size in bytes"))?;
                Self::Touch { path, name, size }
            }
            "rmdir" => Self::Rmdir(arg(&mut tokens, "rmdir <path>")?),
            "destroy" => Self::Destroy(arg(&mut tokens, "destroy <path>")?),
            "showFat" => Self::ShowFat,
            "help" => Self::Help,
            "exit" => Self::Exit,
            other => return Err(format!("{other:?} is not a valid command, try `help`")),
        };

        Ok(Some(cmd))
    }
}

fn arg<'a>(tokens: &mut impl Iterator<Item = &'a str>, usage: &str) -> Result<&'a str, String> {
    tokens.next().ok_or_else(|| format!("usage: {usage}"))
}

/// Executes one command against the file system, rendering the outcome.
/// Returns `false` once the session should end.
pub fn run(fs: &mut FatFileSystem, cmd: Command) -> bool {
    match cmd {
        Command::Exit => return false,
        Command::Help => print_help(),
        Command::ShowFat => show_fat(fs),
        Command::Ls(path) => match fs.read_dir(path) {
            Ok(entries) => {
                let names: Vec<&str> = entries.map(Node::name).collect();
                println!("{}", names.join(" "));
            }
            Err(e) => println!("ls: {e}"),
        },
        Command::Mkdir { path, name } => match fs.create_dir(path, name) {
            Ok(()) => println!("directory {name:?} created"),
            Err(e) => println!("mkdir: {e}"),
        },
        Command::Touch { path, name, size } => match fs.create_file(path, name, size) {
            Ok(file) => {
                let start = file.start();
                println!("file {:?} allocated", file.name());
                let chain: Vec<String> =
                    fs.table().chain(start).map(|id| id.to_string()).collect();
                println!("{}", chain.join(" -> "));
            }
            Err(e) => println!("touch: {e}"),
        },
        Command::Rmdir(path) => match fs.delete_dir(path) {
            Ok(()) => println!("directory {path} deleted"),
            Err(e) => println!("rmdir: {e}"),
        },
        Command::Destroy(path) => match fs.delete_file(path) {
            Ok(()) => println!("file {path} deleted"),
            Err(e) => println!("destroy: {e}"),
        },
    }
    true
}

fn show_fat(fs: &FatFileSystem) {
    for (id, cluster) in fs.table().dump() {
        let state = if cluster.is_free() { "free" } else { "used" };
        if cluster.internal_frag() > 0 {
            println!(
                "{id:>2}  {state}  {:<16} frag:{}",
                cluster.owner(),
                cluster.internal_frag(),
            );
        } else {
            println!("{id:>2}  {state}  {}", cluster.owner());
        }
    }
    println!(
        "free storage: {} ({} B)",
        ByteSizeIec(fs.table().free_bytes() as u64),
        fs.table().free_bytes(),
    );
}

pub fn print_help() {
    const COMMANDS: [(&str, &str); 8] = [
        ("ls <path>", "list the contents of <path>"),
        ("mkdir <path> <name>", "create an empty directory <name> under <path>"),
        ("touch <path> <name> <size>", "create a file of <size> bytes under <path>"),
        ("rmdir <path>", "delete the directory at <path> and everything below it"),
        ("destroy <path>", "delete the file at <path>"),
        ("showFat", "print the FAT cluster table"),
        ("help", "print this command list"),
        ("exit", "leave the shell"),
    ];

    println!("COMMANDS");
    for (usage, what) in COMMANDS {
        println!("  {usage:<30}{what}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_none() {
        assert_eq!(Ok(None), Command::parse(""));
        assert_eq!(Ok(None), Command::parse("   \t"));
    }

    #[test]
    fn positional_arguments() {
        assert_eq!(Ok(Some(Command::Ls("/"))), Command::parse("ls /"));
        assert_eq!(
            Ok(Some(Command::Touch { path: "/docs", name: "a.txt", size: 1000 })),
            Command::parse("touch /docs a.txt 1000"),
        );
        assert_eq!(
            Ok(Some(Command::Mkdir { path: "/", name: "docs" })),
            Command::parse("  mkdir   /   docs "),
        );
        assert_eq!(Ok(Some(Command::Exit)), Command::parse("exit"));
    }

    #[test]
    fn bad_sizes_are_rejected() {
        assert!(Command::parse("touch / a -5").is_err());
        assert!(Command::parse("touch / a lots").is_err());
        assert!(Command::parse("touch / a 1.5").is_err());
    }

    #[test]
    fn missing_arguments_report_usage() {
        assert_eq!(Err("usage: ls <path>".to_owned()), Command::parse("ls"));
        assert!(Command::parse("mkdir /").is_err());
        assert!(Command::parse("touch / a").is_err());
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(Command::parse("format /").is_err());
    }
}
