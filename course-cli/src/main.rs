//! Entry point for the `course` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = course_cli::run() {
        eprintln!("course: {err}");
        std::process::exit(1);
    }
}
