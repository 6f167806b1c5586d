fn main() {
    symptomscope::run();
}
