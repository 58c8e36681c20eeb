fn main() {
    if let Err(err) = infer_ddl::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
