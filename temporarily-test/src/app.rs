fn main() {
    temporarily_test::repl::execute_with_args();
}
