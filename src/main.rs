fn main() {
    pycompgen::run_cli();
}
