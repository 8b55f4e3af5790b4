fn main() {
    hltv_results::cli::run();
}
