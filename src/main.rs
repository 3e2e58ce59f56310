use std::io;

fn main() -> io::Result<()> {
    sfcdis::cli::main()
}
