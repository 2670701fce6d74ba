fn main() {
    tribo_calc::cli::run();
}
