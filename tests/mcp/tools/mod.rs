mod modify;
