fn main() {
    sa_lookup::app::cli::run();
}
