mod proptest_amounts;
